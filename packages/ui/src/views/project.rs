use dioxus::prelude::*;
use portfolio::{
    AcceptPolicy, Form, ProjectDraft, ProjectType, Visibility, TECHNOLOGY_OPTIONS,
};

use super::submit::use_submit;
use super::StatusBanner;
use crate::files::read_picked;

#[component]
pub fn ProjectForm() -> Element {
    let mut form = use_signal(Form::<ProjectDraft>::new);
    let mut submit = use_submit(form);

    let draft = form.read().draft().clone();
    let status = form.read().status().clone();
    let submitting = form.read().is_submitting();

    // Custom technologies come after the fixed options.
    let custom: Vec<String> = draft
        .technologies
        .iter()
        .filter(|t| !TECHNOLOGY_OPTIONS.contains(&t.as_str()))
        .cloned()
        .collect();

    let add_images = move |evt: FormEvent| async move {
        for (i, file) in read_picked(&evt).await.into_iter().enumerate() {
            let field = format!("Image {}", form.read().draft().images.len() + 1);
            match file.check(AcceptPolicy::Images, &field) {
                Ok(()) => form.write().edit(|d| d.images.push(file)),
                Err(err) => {
                    tracing::debug!("rejected picked image #{i}: {err}");
                    form.write().reject(err);
                }
            }
        }
    };

    rsx! {
        div {
            class: "view-page",
            h1 { class: "view-title", "Upload Project" }

            form {
                class: "record-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    submit();
                },

                label { "Project Name *" }
                input {
                    value: "{draft.project_name}",
                    oninput: move |e| form.write().edit(|d| d.project_name = e.value()),
                }

                label { "Visibility" }
                select {
                    value: "{draft.visibility.as_str()}",
                    onchange: move |e| {
                        if let Some(v) = Visibility::parse(&e.value()) {
                            form.write().edit(|d| d.visibility = v);
                        }
                    },
                    for v in Visibility::ALL {
                        option {
                            key: "{v.as_str()}",
                            value: v.as_str(),
                            selected: draft.visibility == v,
                            "{v.label()}"
                        }
                    }
                }

                label { "Created Date" }
                input {
                    r#type: "date",
                    value: "{draft.created_date}",
                    oninput: move |e| form.write().edit(|d| d.created_date = e.value()),
                }

                fieldset {
                    class: "technologies",
                    legend { "Technologies" }
                    for tech in TECHNOLOGY_OPTIONS.iter().copied() {
                        label {
                            key: "{tech}",
                            class: "tech-option",
                            input {
                                r#type: "checkbox",
                                checked: draft.has_technology(tech),
                                onchange: move |_| form.write().edit(|d| d.toggle_technology(tech)),
                            }
                            "{tech}"
                        }
                    }
                    for tech in custom {
                        span {
                            key: "{tech}",
                            class: "tech-custom",
                            "{tech}"
                            button {
                                r#type: "button",
                                aria_label: "Remove {tech}",
                                onclick: {
                                    let tech = tech.clone();
                                    move |_| form.write().edit(|d| d.toggle_technology(&tech))
                                },
                                "\u{2715}"
                            }
                        }
                    }
                    div {
                        class: "tech-add",
                        input {
                            value: "{draft.new_technology}",
                            placeholder: "Add another technology",
                            oninput: move |e| form.write().edit(|d| d.new_technology = e.value()),
                            onkeydown: move |e: KeyboardEvent| {
                                if e.key() == Key::Enter {
                                    e.prevent_default();
                                    form.write().edit(|d| {
                                        d.add_new_technology();
                                    });
                                }
                            },
                        }
                        button {
                            r#type: "button",
                            onclick: move |_| form.write().edit(|d| {
                                d.add_new_technology();
                            }),
                            "Add"
                        }
                    }
                }

                label { "Description *" }
                textarea {
                    rows: "4",
                    value: "{draft.description}",
                    oninput: move |e| form.write().edit(|d| d.description = e.value()),
                }

                label { "Duration" }
                input {
                    value: "{draft.duration}",
                    placeholder: "e.g. 3 months",
                    oninput: move |e| form.write().edit(|d| d.duration = e.value()),
                }

                label { "Project Type" }
                select {
                    value: "{draft.project_type.as_str()}",
                    onchange: move |e| {
                        if let Some(t) = ProjectType::parse(&e.value()) {
                            form.write().edit(|d| d.project_type = t);
                        }
                    },
                    for t in ProjectType::ALL {
                        option {
                            key: "{t.as_str()}",
                            value: t.as_str(),
                            selected: draft.project_type == t,
                            "{t.label()}"
                        }
                    }
                }

                label {
                    class: "checkbox",
                    input {
                        r#type: "checkbox",
                        checked: draft.company_project,
                        onchange: move |e| form.write().edit(|d| d.company_project = e.checked()),
                    }
                    "Company project"
                }

                label { "Images" }
                input {
                    r#type: "file",
                    disabled: submitting,
                    multiple: true,
                    accept: AcceptPolicy::Images.accept_attr(),
                    onchange: add_images,
                }
                ul {
                    class: "image-list",
                    for (index, image) in draft.images.iter().enumerate() {
                        li {
                            key: "{index}-{image.name}",
                            span { "{image.name}" }
                            button {
                                r#type: "button",
                                disabled: submitting,
                                onclick: move |_| form.write().edit(|d| d.remove_image(index)),
                                "Remove"
                            }
                        }
                    }
                }

                label { "GitHub URL" }
                input {
                    r#type: "url",
                    value: "{draft.github_url}",
                    oninput: move |e| form.write().edit(|d| d.github_url = e.value()),
                }

                label { "Live URL" }
                input {
                    r#type: "url",
                    value: "{draft.live_url}",
                    oninput: move |e| form.write().edit(|d| d.live_url = e.value()),
                }

                StatusBanner { status }

                button {
                    r#type: "submit",
                    class: "btn-primary",
                    disabled: submitting,
                    if submitting { "Uploading..." } else { "Upload Project" }
                }
            }
        }
    }
}
