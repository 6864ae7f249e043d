mod feedback;
pub use feedback::{ProgressBar, StatusBanner};

mod shell;
pub use shell::AdminShellView;

mod login;
pub use login::LoginView;

mod overview;
pub use overview::OverviewView;

mod submit;

mod certificate;
pub use certificate::CertificateForm;

mod license_certificate;
pub use license_certificate::LicenseCertificateForm;

mod project;
pub use project::ProjectForm;
