//! View rendering for the certificate form.
//!
//! Sections: user information (common plus template-specific inputs), research or
//! project documents depending on the template, the live preview, the template
//! selector and, while the form is valid, the download button.

use common::model::field::{Field, FileField};
use common::model::template::Template;
use common::preview::PreviewStatus;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::CertificateFormComponent;

type Link = Scope<CertificateFormComponent>;

/// Main view function for the certificate form.
pub fn view(component: &CertificateFormComponent, ctx: &Context<CertificateFormComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="sections-container">
            <div class="section-box user-info">
                <h2>{ "User Information" }</h2>
                { user_info_inputs(component, link) }
                { missing_fields_hint(component) }
            </div>

            { documents_section(component, link) }

            <div class="section-box preview">
                <h2>{ "Preview" }</h2>
                { preview_frame(component) }
            </div>

            <div class="section-box template">
                <h2>{ "Certificate Template" }</h2>
                <div class="button-group">
                    { for Template::ALL.iter().map(|template| template_button(component, link, template)) }
                </div>
            </div>

            { download_section(component, link) }
        </div>
    }
}

/// Common identity inputs followed by the inputs the selected template needs.
fn user_info_inputs(component: &CertificateFormComponent, link: &Link) -> Html {
    let common_inputs: Html = Field::COMMON
        .iter()
        .map(|field| text_input(component, link, *field, "text"))
        .collect();

    let specific = match component.controller.selected_template() {
        Template::Internship => html! {
            <>
                { text_input(component, link, Field::FromDate, "date") }
                { text_input(component, link, Field::ToDate, "date") }
                { text_input(component, link, Field::InternshipCourse, "text") }
            </>
        },
        Template::Study => html! {
            <>
                { text_input(component, link, Field::StudyProgram, "text") }
                <div class="instructions-section">
                    <h3>{ "Instructions" }</h3>
                    <p>{ component.controller.instructions() }</p>
                </div>
            </>
        },
        Template::Research => text_input(component, link, Field::ResearchTopic, "text"),
        Template::Course => text_input(component, link, Field::CourseName, "text"),
        Template::Unrecognized(_) => Html::default(),
    };

    html! {
        <>
            { common_inputs }
            { specific }
        </>
    }
}

/// Research documentation for research certificates, project documents for
/// internship and course certificates, nothing for study certificates.
fn documents_section(component: &CertificateFormComponent, link: &Link) -> Html {
    match component.controller.selected_template() {
        Template::Study => Html::default(),
        Template::Research => html! {
            <div class="section-box research-doc">
                <h2>{ "Research Documentation" }</h2>
                { text_input(component, link, Field::ResearchTopic, "text") }
                { text_input(component, link, Field::ResearchDomain, "text") }
                { text_area(component, link, Field::ResearchDescription) }
            </div>
        },
        _ => html! {
            <div class="section-box project-doc">
                <h2>{ "Project Documents" }</h2>
                { text_input(component, link, Field::ProjectTitle, "text") }
                { text_area(component, link, Field::ProjectDescription) }
                { file_input(component, link, FileField::ProjectReport) }
                { file_input(component, link, FileField::ProjectPpt) }
            </div>
        },
    }
}

fn placeholder_for(field: Field) -> String {
    format!("Enter {}", field.label().to_lowercase())
}

fn text_input(component: &CertificateFormComponent, link: &Link, field: Field, kind: &'static str) -> Html {
    let value = component.controller.request().get(field).to_string();
    let oninput = link.callback(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        Msg::UpdateField(field, input.value())
    });
    let placeholder = if kind == "date" { String::new() } else { placeholder_for(field) };

    html! {
        <label class="input-label">
            { format!("{}:", field.label()) }
            <input type={kind} name={field.name()} {value} {oninput} {placeholder} />
        </label>
    }
}

fn text_area(component: &CertificateFormComponent, link: &Link, field: Field) -> Html {
    let value = component.controller.request().get(field).to_string();
    let oninput = link.callback(move |e: InputEvent| {
        let input: HtmlTextAreaElement = e.target_unchecked_into();
        Msg::UpdateField(field, input.value())
    });

    html! {
        <label class="input-label">
            { format!("{}:", field.label()) }
            <textarea name={field.name()} {value} {oninput} placeholder={placeholder_for(field)} />
        </label>
    }
}

/// File picker. The `.pdf` filter is a browser hint; nothing checks the content.
fn file_input(component: &CertificateFormComponent, link: &Link, field: FileField) -> Html {
    let onchange = link.callback(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().and_then(|files| files.get(0));
        Msg::FileSelected(field, file)
    });
    let chosen = component
        .controller
        .request()
        .attachment(field)
        .map(|attachment| html! { <small>{ format!("{} ({} bytes)", attachment.name, attachment.size) }</small> });

    html! {
        <label class="input-label">
            { format!("{}:", field.label()) }
            <input type="file" name={field.name()} accept=".pdf" {onchange} />
            { for chosen }
        </label>
    }
}

fn missing_fields_hint(component: &CertificateFormComponent) -> Html {
    let missing = component.controller.missing_fields();
    if missing.is_empty() {
        return Html::default();
    }
    let names: Vec<&str> = missing.iter().map(|field| field.label()).collect();
    html! {
        <p class="missing-hint">{ format!("Still required: {}", names.join(", ")) }</p>
    }
}

fn preview_frame(component: &CertificateFormComponent) -> Html {
    let status = match component.controller.preview_status() {
        PreviewStatus::Rendering => html! { <small>{ "Updating preview..." }</small> },
        PreviewStatus::Failed(_) => html! { <small>{ "Preview could not be updated." }</small> },
        PreviewStatus::Idle | PreviewStatus::Ready => Html::default(),
    };

    html! {
        <>
            { status }
            {
                match component.preview_url() {
                    Some(url) => html! {
                        <iframe src={url.to_string()} width="100%" height="500px" title="Certificate preview" />
                    },
                    None => Html::default(),
                }
            }
        </>
    }
}

fn template_button(component: &CertificateFormComponent, link: &Link, template: &Template) -> Html {
    let class = if component.controller.selected_template() == template { "selected" } else { "" };
    let selected = template.clone();
    html! {
        <button {class} onclick={link.callback(move |_| Msg::SelectTemplate(selected.clone()))}>
            { template.label() }
        </button>
    }
}

fn download_section(component: &CertificateFormComponent, link: &Link) -> Html {
    if !component.controller.is_valid() {
        return Html::default();
    }
    let preparing = component.controller.is_preparing_download();
    let label = if preparing { "Preparing document..." } else { "Download Certificate" };

    html! {
        <div class="section-box download">
            <h2>{ "Download Certificate" }</h2>
            <button class="download-button" disabled={preparing} onclick={link.callback(|_| Msg::Download)}>
                { label }
            </button>
        </div>
    }
}
