use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

pub mod booking;
pub mod card;
pub mod config;
pub mod error;
#[cfg(feature = "native")]
pub mod fetch;
pub mod filter;
pub mod log;
pub mod rank;
pub mod search;
pub mod transform;
pub mod types;
pub mod url_state;

#[cfg(test)]
mod testing;

use crate::card::DoctorCard;
use crate::config::DirectoryConfig;
use crate::error::DirectoryError;
use types::{ConsultationType, Doctor, FilterState, SortKey};

/// Directory state: the loaded doctors, the specialty options derived from
/// them, the current filters and the list those filters produce
pub struct DirectoryEngine {
    doctors: Vec<Doctor>,
    specialties: Vec<String>,
    state: FilterState,
    results: Vec<Doctor>,
    config: DirectoryConfig,
}

impl DirectoryEngine {
    /// Build the engine from an already transformed doctor list
    pub fn new(doctors: Vec<Doctor>, state: FilterState, config: DirectoryConfig) -> Self {
        let specialties = transform::extract_specialties(&doctors);
        let mut engine = DirectoryEngine {
            doctors,
            specialties,
            state,
            results: Vec::new(),
            config,
        };
        engine.refresh();
        engine
    }

    /// A directory with no doctors, still accepting filter changes
    pub fn empty(state: FilterState, config: DirectoryConfig) -> Self {
        Self::new(Vec::new(), state, config)
    }

    /// Parse the endpoint body and seed the filters from the page's query string
    pub fn from_api_json(
        api_json: &str,
        query: &str,
        config: DirectoryConfig,
    ) -> Result<Self, DirectoryError> {
        let doctors = transform::parse_api_data(api_json)?;
        Ok(Self::new(doctors, FilterState::from_query(query), config))
    }

    fn refresh(&mut self) {
        let start = log::now_ms();
        self.results = filter::apply_filters(&self.doctors, &self.state);
        log::info(&format!(
            "[perf] filters query='{}' matched={}/{} | total={:.1}ms",
            self.state.to_query(),
            self.results.len(),
            self.doctors.len(),
            log::now_ms() - start
        ));
    }

    /// Apply one change to the filters, re-derive the results and return the
    /// query string that now describes the state
    pub fn update<F>(&mut self, change: F) -> String
    where
        F: FnOnce(&mut FilterState),
    {
        change(&mut self.state);
        self.refresh();
        self.state.to_query()
    }

    pub fn set_search_term(&mut self, term: &str) -> String {
        self.update(|state| state.search = term.to_string())
    }

    pub fn set_consultation(&mut self, consultation: Option<ConsultationType>) -> String {
        self.update(|state| state.consultation = consultation)
    }

    pub fn toggle_specialty(&mut self, specialty: &str) -> String {
        self.update(|state| state.toggle_specialty(specialty))
    }

    pub fn set_specialties<I>(&mut self, specialties: I) -> String
    where
        I: IntoIterator<Item = String>,
    {
        self.update(|state| {
            state.specialties = specialties
                .into_iter()
                .filter(|s| types::is_selectable_specialty(s))
                .collect()
        })
    }

    pub fn set_sort(&mut self, sort: Option<SortKey>) -> String {
        self.update(|state| state.sort = sort)
    }

    pub fn clear_filters(&mut self) -> String {
        self.update(FilterState::clear_filters)
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn results(&self) -> &[Doctor] {
        &self.results
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn cards(&self) -> Vec<DoctorCard> {
        self.results
            .iter()
            .map(|doctor| DoctorCard::from_doctor(doctor, &self.config.photo_placeholder))
            .collect()
    }

    /// Suggestions come from the full list, not the filtered one
    pub fn suggestions(&self, term: &str) -> Vec<&Doctor> {
        search::suggestions(&self.doctors, term, self.config.suggestion_limit)
    }

    pub fn query(&self) -> String {
        self.state.to_query()
    }
}

// Use thread_local with RefCell for lazy initialization from JS
thread_local! {
    static ENGINE: RefCell<Option<DirectoryEngine>> = const { RefCell::new(None) };
}

const NOT_INITIALIZED: &str = "Directory not initialized. Call init_directory(api_json, query, config_json) first.";

fn with_engine<T, F>(f: F) -> Result<T, JsError>
where
    F: FnOnce(&DirectoryEngine) -> Result<T, JsError>,
{
    ENGINE.with(|engine| {
        let engine_ref = engine.borrow();
        match engine_ref.as_ref() {
            Some(eng) => f(eng),
            None => Err(JsError::new(NOT_INITIALIZED)),
        }
    })
}

/// Mutate the filters, then replace the current history entry with the new query
fn update_engine<F>(f: F) -> Result<String, JsError>
where
    F: FnOnce(&mut DirectoryEngine) -> String,
{
    let query = ENGINE.with(|engine| {
        let mut engine_ref = engine.borrow_mut();
        match engine_ref.as_mut() {
            Some(eng) => Ok(f(eng)),
            None => Err(JsError::new(NOT_INITIALIZED)),
        }
    })?;
    replace_browser_query(&query);
    Ok(query)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value)
        .map_err(|e| JsError::new(&format!("Failed to serialize: {}", e)))
}

fn parse_config(config_json: &str) -> Result<DirectoryConfig, JsError> {
    DirectoryConfig::from_json(config_json)
        .map_err(|e| JsError::new(&format!("Failed to parse config: {}", e)))
}

#[cfg(target_arch = "wasm32")]
fn replace_browser_query(query: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let path = window.location().pathname().unwrap_or_default();
    let url = if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    };
    let replaced = window
        .history()
        .and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&url)));
    if let Err(e) = replaced {
        log::error(&format!("Failed to update URL: {:?}", e));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn replace_browser_query(_query: &str) {}

#[cfg(target_arch = "wasm32")]
fn today() -> Option<chrono::NaiveDate> {
    let now = js_sys::Date::new_0();
    chrono::NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
}

#[cfg(not(target_arch = "wasm32"))]
fn today() -> Option<chrono::NaiveDate> {
    Some(chrono::Local::now().date_naive())
}

/// Initialize the directory from the fetched endpoint body.
/// api_json: JSON array of API doctor records
/// query: the page's current query string (`location.search`)
/// config_json: JSON of DirectoryConfig, "" or "{}" for defaults
///
/// On a parse failure the directory is still initialized, with no doctors,
/// and the returned error carries the user-facing message.
#[wasm_bindgen]
pub fn init_directory(api_json: &str, query: &str, config_json: &str) -> Result<usize, JsError> {
    let config = parse_config(config_json)?;

    match DirectoryEngine::from_api_json(api_json, query, config.clone()) {
        Ok(engine) => {
            let count = engine.doctors().len();
            let query = engine.query();
            ENGINE.with(|slot| *slot.borrow_mut() = Some(engine));
            replace_browser_query(&query);
            Ok(count)
        }
        Err(e) => {
            log::error(&format!("Error fetching doctors data: {}", e));
            let message = e.user_message();
            ENGINE.with(|slot| {
                *slot.borrow_mut() = Some(DirectoryEngine::empty(FilterState::from_query(query), config))
            });
            Err(JsError::new(message))
        }
    }
}

/// Record a failed fetch (network error or non-2xx status). The directory is
/// initialized empty; the returned text is the notification to show.
#[wasm_bindgen]
pub fn report_fetch_failure(reason: &str, query: &str, config_json: &str) -> Result<String, JsError> {
    let config = parse_config(config_json)?;
    let error = DirectoryError::Fetch(reason.to_string());
    log::error(&format!("Error fetching doctors data: {}", error));

    ENGINE.with(|slot| {
        *slot.borrow_mut() = Some(DirectoryEngine::empty(FilterState::from_query(query), config))
    });
    Ok(error.user_message().to_string())
}

/// Check if the directory has been initialized
#[wasm_bindgen]
pub fn is_directory_ready() -> bool {
    ENGINE.with(|engine| engine.borrow().is_some())
}

/// Sorted specialty options as a JSON array of strings
#[wasm_bindgen]
pub fn get_specialties() -> Result<String, JsError> {
    with_engine(|eng| to_json(eng.specialties()))
}

#[wasm_bindgen]
pub fn get_filter_state() -> Result<String, JsError> {
    with_engine(|eng| to_json(eng.state()))
}

/// Each setter returns the new query string (without `?`)
#[wasm_bindgen]
pub fn set_search_term(term: &str) -> Result<String, JsError> {
    update_engine(|eng| eng.set_search_term(term))
}

#[wasm_bindgen]
pub fn set_consultation(consultation: Option<String>) -> Result<String, JsError> {
    let consultation = consultation.as_deref().and_then(url_state::consultation_param);
    update_engine(|eng| eng.set_consultation(consultation))
}

#[wasm_bindgen]
pub fn toggle_specialty(specialty: &str) -> Result<String, JsError> {
    update_engine(|eng| eng.toggle_specialty(specialty))
}

/// specialties: comma-separated names
#[wasm_bindgen]
pub fn set_specialties(specialties: &str) -> Result<String, JsError> {
    let names: Vec<String> = specialties.split(',').map(str::to_string).collect();
    update_engine(|eng| eng.set_specialties(names))
}

#[wasm_bindgen]
pub fn set_sort(sort: Option<String>) -> Result<String, JsError> {
    let sort = sort.as_deref().and_then(url_state::sort_param);
    update_engine(|eng| eng.set_sort(sort))
}

/// Clear consultation, specialties and sort. The search term stays.
#[wasm_bindgen]
pub fn clear_filters() -> Result<String, JsError> {
    update_engine(DirectoryEngine::clear_filters)
}

/// Filtered and sorted doctors as JSON
#[wasm_bindgen]
pub fn get_results() -> Result<String, JsError> {
    with_engine(|eng| to_json(eng.results()))
}

/// Filtered and sorted doctors as card view models
#[wasm_bindgen]
pub fn get_cards() -> Result<String, JsError> {
    with_engine(|eng| to_json(&eng.cards()))
}

#[wasm_bindgen]
pub fn get_result_summary() -> Result<String, JsError> {
    with_engine(|eng| Ok(card::result_summary(eng.results().len())))
}

#[wasm_bindgen]
pub fn get_suggestions(term: &str) -> Result<String, JsError> {
    with_engine(|eng| to_json(&eng.suggestions(term)))
}

#[wasm_bindgen]
pub fn get_query_string() -> Result<String, JsError> {
    with_engine(|eng| Ok(eng.query()))
}

#[wasm_bindgen]
pub fn get_time_slots() -> Result<String, JsError> {
    to_json(&booking::TIME_SLOTS)
}

/// Calendar check for a `YYYY-MM-DD` date
#[wasm_bindgen]
pub fn is_date_bookable(date: &str) -> bool {
    match (chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d"), today()) {
        (Ok(date), Some(today)) => booking::is_bookable_date(date, today),
        _ => false,
    }
}

/// Validate the booking dialog and return the confirmation notice as JSON.
/// Nothing leaves the page.
#[wasm_bindgen]
pub fn book_appointment(request_json: &str) -> Result<String, JsError> {
    let request: booking::BookingRequest = serde_json::from_str(request_json)
        .map_err(|e| JsError::new(&format!("Failed to parse booking: {}", e)))?;
    let today = today().ok_or_else(|| JsError::new("Failed to read today's date"))?;

    let confirmation =
        booking::validate_booking(&request, today).map_err(|e| JsError::new(&e.to_string()))?;
    log::info(&format!(
        "booking confirmed locally for {} on {} at {}",
        request.doctor_name, confirmation.date, confirmation.time
    ));
    to_json(&confirmation)
}
