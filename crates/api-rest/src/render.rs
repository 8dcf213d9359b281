//! HTML render layer.
//!
//! Turns a [`Directory`] into the directory page. Every link on the page (badge
//! removal, suggestion pick, reset) is the URL of the state reached by one
//! [`Action`], so clicking it is a plain navigation and a new history entry.

use directory_core::constants::{LOAD_FAILED_NOTICE, NO_RESULTS_NOTICE};
use directory_core::{
    active_badges, href, Action, ConsultationType, Directory, Doctor, FilterState, SortKey,
};
use minijinja::{context, Environment};
use serde::Serialize;

const PAGE_TEMPLATE: &str = "page.html";

/// Path of the HTML directory page.
pub const PAGE_PATH: &str = "/";

/// Path that applies a suggestion pick.
pub const SELECT_SUGGESTION_PATH: &str = "/suggestions/select";

/// Query flag that opens the suggestion list. It is set only by the search
/// form's suggest button; every other link and redirect leaves it out, which
/// closes the list.
pub const SHOW_SUGGESTIONS_PARAM: &str = "suggest";

/// Hidden form field carrying the canonical query of the state being edited.
pub const CURRENT_STATE_FIELD: &str = "state";

/// Build the template environment.
///
/// Templates are named `*.html`, so minijinja escapes every interpolated value.
pub fn templates() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(PAGE_TEMPLATE, include_str!("../templates/page.html"))?;
    Ok(env)
}

#[derive(Debug, Serialize)]
struct ChoiceView {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct SpecialtyView {
    name: String,
    test_id: String,
    checked: bool,
}

#[derive(Debug, Serialize)]
struct BadgeView {
    kind: &'static str,
    value: String,
    label: String,
    remove_href: String,
}

#[derive(Debug, Serialize)]
struct SuggestionView {
    id: String,
    name: String,
    href: String,
}

#[derive(Debug, Serialize)]
struct CardView {
    photo: String,
    name: String,
    specialty: String,
    introduction: String,
    experience: String,
    fee: String,
    languages: String,
}

impl From<&Doctor> for CardView {
    fn from(doctor: &Doctor) -> Self {
        Self {
            photo: doctor.photo.clone(),
            name: doctor.name.clone(),
            specialty: doctor.primary_specialty().unwrap_or_default().to_string(),
            introduction: doctor.introduction.clone(),
            experience: doctor.experience.label.clone(),
            fee: doctor.fee.label.clone(),
            languages: doctor.languages.join(", "),
        }
    }
}

#[derive(Debug, Serialize)]
struct PageView {
    search: String,
    /// Canonical query of the rendered state, posted back by the form.
    query: String,
    reset_href: String,
    dismiss_href: String,
    sort_options: Vec<ChoiceView>,
    consultation_options: Vec<ChoiceView>,
    specialties: Vec<SpecialtyView>,
    badges: Vec<BadgeView>,
    suggestions: Vec<SuggestionView>,
    doctors: Vec<CardView>,
    no_results_notice: &'static str,
}

impl PageView {
    fn build(directory: &Directory, show_suggestions: bool) -> Self {
        let filters = directory.filters();

        let sort_options = SortKey::ALL
            .into_iter()
            .map(|key| ChoiceView {
                value: key.as_str(),
                label: key.label(),
                selected: key == filters.sort,
            })
            .collect();

        let consultation_options = [ConsultationType::Video, ConsultationType::Clinic]
            .into_iter()
            .map(|c| ChoiceView {
                value: c.as_str(),
                label: c.label(),
                selected: c == filters.consultation,
            })
            .collect();

        let specialties = directory
            .catalogue()
            .specialty_names()
            .into_iter()
            .map(|name| SpecialtyView {
                name: name.to_string(),
                test_id: specialty_test_id(name),
                checked: filters.is_specialty_selected(name),
            })
            .collect();

        let badges = active_badges(filters)
            .into_iter()
            .map(|badge| BadgeView {
                kind: badge.kind.as_str(),
                value: badge.kind.value().to_string(),
                remove_href: directory.href_after(PAGE_PATH, Action::RemoveBadge(badge.kind)),
                label: badge.label,
            })
            .collect();

        let suggestions = if show_suggestions {
            directory
                .suggestions()
                .into_iter()
                .map(|doctor| SuggestionView {
                    id: doctor.id.clone(),
                    name: doctor.name.clone(),
                    href: suggestion_href(filters, &doctor.id),
                })
                .collect()
        } else {
            Vec::new()
        };

        let doctors = directory.view().into_iter().map(CardView::from).collect();

        Self {
            search: filters.search.clone(),
            query: directory.query(),
            reset_href: directory.href_after(PAGE_PATH, Action::Reset),
            dismiss_href: href(PAGE_PATH, filters),
            sort_options,
            consultation_options,
            specialties,
            badges,
            suggestions,
            doctors,
            no_results_notice: NO_RESULTS_NOTICE,
        }
    }
}

/// Render the directory page for the directory's current state.
///
/// The suggestion list is only rendered when `show_suggestions` is set.
pub fn render_page(
    env: &Environment<'_>,
    directory: &Directory,
    show_suggestions: bool,
) -> Result<String, minijinja::Error> {
    let template = env.get_template(PAGE_TEMPLATE)?;
    template.render(context! { page => PageView::build(directory, show_suggestions) })
}

/// Page URL for `filters` with the suggestion list open.
pub fn suggestions_href(filters: &FilterState) -> String {
    let state_href = href(PAGE_PATH, filters);
    let separator = if state_href.contains('?') { '&' } else { '?' };
    format!("{state_href}{separator}{SHOW_SUGGESTIONS_PARAM}=1")
}

/// True if the raw query asks for the suggestion list.
pub fn wants_suggestions(query: &str) -> bool {
    url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .any(|(key, value)| key == SHOW_SUGGESTIONS_PARAM && !value.is_empty())
}

/// Render the page shown when the doctor data could not be loaded.
///
/// Only the error notice is rendered; there are no filters to interact with.
pub fn render_load_failure(env: &Environment<'_>) -> Result<String, minijinja::Error> {
    let template = env.get_template(PAGE_TEMPLATE)?;
    template.render(context! { load_error => LOAD_FAILED_NOTICE })
}

/// `filter-specialty-` followed by the name with each whitespace run replaced by `-`.
pub fn specialty_test_id(name: &str) -> String {
    let mut id = String::from("filter-specialty-");
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                id.push('-');
            }
            in_whitespace = true;
        } else {
            id.push(c);
            in_whitespace = false;
        }
    }
    id
}

/// Suggestion links carry the current state so that picking one keeps the
/// other filters.
fn suggestion_href(filters: &FilterState, doctor_id: &str) -> String {
    let state_href = href(SELECT_SUGGESTION_PATH, filters);
    let separator = if state_href.contains('?') { '&' } else { '?' };
    let id: String = url::form_urlencoded::byte_serialize(doctor_id.as_bytes()).collect();
    format!("{state_href}{separator}id={id}")
}
