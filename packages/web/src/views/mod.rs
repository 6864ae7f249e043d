mod login;
pub use login::Login;

mod dashboard;
pub use dashboard::Dashboard;

mod forms;
pub use forms::{Certificates, LicenseCertificates, Overview, Projects};
