//! tender-ai: tender discovery front-end.
//!
//! This crate provides a WASM client that searches published government
//! tenders over an animated particle background. Authentication and the
//! tenders table live in a hosted service consumed through [`services`].

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod services;

pub use components::particle_background::{ParticleBackground, ParticleConfig};
pub use components::tender_card::TenderCard;
use services::tenders::{
	DataClient, FilterField, InMemoryTenders, TENDERS_PER_PAGE, Tender, TenderFilters, page,
	total_pages,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("tender-ai: logging initialized");
}

/// Load tender rows from a script element with id="tender-data".
/// Expected format: a JSON array of tender objects.
fn load_tender_data() -> Option<Vec<Tender>> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("tender-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<Vec<Tender>>(&json_text) {
		Ok(rows) => {
			info!("tender-ai: loaded {} tenders", rows.len());
			Some(rows)
		}
		Err(e) => {
			warn!("tender-ai: failed to parse tender data: {}", e);
			None
		}
	}
}

/// One labelled input bound to `field`. Any edit restarts at page 1.
fn filter_input(
	field: FilterField,
	filters: RwSignal<TenderFilters>,
	set_current_page: WriteSignal<usize>,
) -> impl IntoView {
	view! {
		<label class="filter-field">
			<span>{field.label()}</span>
			<input
				type=field.input_type()
				placeholder=field.placeholder()
				prop:value=move || filters.with(|f| f.get(field).to_string())
				on:input=move |ev| {
					filters.update(|f| f.set(field, event_target_value(&ev)));
					set_current_page.set(1);
				}
			/>
		</label>
	}
}

/// Main application component.
/// Loads tenders from the DOM and renders the filtered search over them.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let tenders = InMemoryTenders::new(load_tender_data().unwrap_or_default());
	let filters = RwSignal::new(TenderFilters::default());
	let (current_page, set_current_page) = signal(1_usize);

	let results = Memo::new(move |_| {
		let query = filters.with(TenderFilters::to_query);
		tenders.query(&query).unwrap_or_else(|e| {
			warn!("tender-ai: search failed: {}", e);
			Vec::new()
		})
	});
	let pages = move || results.with(|rows| total_pages(rows.len(), TENDERS_PER_PAGE));
	let visible =
		move || results.with(|rows| page(rows, current_page.get(), TENDERS_PER_PAGE).to_vec());
	let heading = move || {
		let n = results.with(Vec::len);
		format!("{} {} Found", n, if n == 1 { "Tender" } else { "Tenders" })
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Tender AI" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackground />
		<main class="tender-search">
			<h1>"Search Tenders"</h1>
			<input
				class="keyword-search"
				type=FilterField::Keyword.input_type()
				placeholder=FilterField::Keyword.placeholder()
				prop:value=move || filters.with(|f| f.keyword.clone())
				on:input=move |ev| {
					filters.update(|f| f.set(FilterField::Keyword, event_target_value(&ev)));
					set_current_page.set(1);
				}
			/>
			<section class="filter-panel">
				<h3>"Advanced Filters"</h3>
				{FilterField::PANEL
					.into_iter()
					.map(|field| filter_input(field, filters, set_current_page))
					.collect_view()}
				<button
					disabled=move || !filters.with(TenderFilters::is_active)
					on:click=move |_| {
						filters.set(TenderFilters::default());
						set_current_page.set(1);
					}
				>
					"Clear Filters"
				</button>
			</section>
			<h2>{heading}</h2>
			<p class="subtitle">{move || format!("Page {} of {}", current_page.get(), pages())}</p>
			<div class="tender-grid">
				<For
					each=visible
					key=|tender: &Tender| tender.tender_id.clone()
					children=move |tender: Tender| view! { <TenderCard tender /> }
				/>
			</div>
			<nav class="pagination">
				<button
					disabled=move || current_page.get() <= 1
					on:click=move |_| set_current_page.update(|p| *p = p.saturating_sub(1).max(1))
				>
					"Previous"
				</button>
				<button
					disabled=move || current_page.get() >= pages()
					on:click=move |_| set_current_page.update(|p| *p += 1)
				>
					"Next"
				</button>
			</nav>
		</main>
	}
}
