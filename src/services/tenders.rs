//! Tender rows, search filters and the query contract of the hosted table.
//!
//! Filters typed into the search form become a conjunction of simple
//! predicates against the `tenders` table. The hosted store evaluates them;
//! [`InMemoryTenders`] evaluates the same predicates locally for page-embedded
//! data.

use std::cmp::Ordering as CmpOrdering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Table holding published tenders.
pub const TENDERS_TABLE: &str = "tenders";

/// Results shown per search page.
pub const TENDERS_PER_PAGE: usize = 12;

/// One published tender.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tender {
	/// Public reference, e.g. `GOV001`.
	pub tender_id: String,
	/// Issuing body.
	pub organization: String,
	/// Procurement category.
	pub category: String,
	/// Place of performance.
	pub location: String,
	/// Contract value in dollars.
	pub value: f64,
	/// ISO date, `YYYY-MM-DD`.
	pub deadline: String,
	/// Free-text summary.
	pub description: String,
	/// Official notice URL.
	pub link: String,
	/// Insertion timestamp; newest tenders sort first.
	#[serde(default)]
	pub created_at: Option<String>,
}

/// Columns the front-end filters or sorts on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Column {
	TenderId,
	Organization,
	Category,
	Location,
	Value,
	Deadline,
	Description,
	CreatedAt,
}

impl Column {
	/// Column name in the hosted table.
	pub fn as_str(self) -> &'static str {
		match self {
			Column::TenderId => "tender_id",
			Column::Organization => "organization",
			Column::Category => "category",
			Column::Location => "location",
			Column::Value => "value",
			Column::Deadline => "deadline",
			Column::Description => "description",
			Column::CreatedAt => "created_at",
		}
	}

	fn text(self, tender: &Tender) -> Option<&str> {
		match self {
			Column::TenderId => Some(&tender.tender_id),
			Column::Organization => Some(&tender.organization),
			Column::Category => Some(&tender.category),
			Column::Location => Some(&tender.location),
			Column::Deadline => Some(&tender.deadline),
			Column::Description => Some(&tender.description),
			Column::CreatedAt => tender.created_at.as_deref(),
			Column::Value => None,
		}
	}
}

/// A single comparison. A query matches rows satisfying all of its predicates.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
	/// Case-insensitive substring match.
	#[allow(missing_docs)]
	Contains { column: Column, needle: String },
	/// Exact text match.
	#[allow(missing_docs)]
	Equals { column: Column, value: String },
	/// Numeric `>=`.
	#[allow(missing_docs)]
	AtLeast { column: Column, value: i64 },
	/// Numeric `<=`.
	#[allow(missing_docs)]
	AtMost { column: Column, value: i64 },
	/// Text `<=`; ISO dates order lexicographically.
	#[allow(missing_docs)]
	OnOrBefore { column: Column, date: String },
	/// Matches when any inner predicate matches.
	AnyOf(Vec<Predicate>),
}

impl Predicate {
	/// Evaluates the predicate against one row.
	pub fn matches(&self, tender: &Tender) -> bool {
		match self {
			Predicate::Contains { column, needle } => column
				.text(tender)
				.is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
			Predicate::Equals { column, value } => column.text(tender) == Some(value.as_str()),
			Predicate::AtLeast { column, value } => {
				numeric(*column, tender).is_some_and(|n| n >= *value as f64)
			}
			Predicate::AtMost { column, value } => {
				numeric(*column, tender).is_some_and(|n| n <= *value as f64)
			}
			Predicate::OnOrBefore { column, date } => {
				column.text(tender).is_some_and(|text| text <= date.as_str())
			}
			Predicate::AnyOf(inner) => inner.iter().any(|p| p.matches(tender)),
		}
	}
}

fn numeric(column: Column, tender: &Tender) -> Option<f64> {
	match column {
		Column::Value => Some(tender.value),
		_ => None,
	}
}

/// Sort order of a result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ordering {
	/// Sort key.
	pub column: Column,
	/// Smallest first when true.
	pub ascending: bool,
}

/// `query(table, predicates, ordering)` as sent to the hosted store.
#[derive(Clone, Debug, PartialEq)]
pub struct TenderQuery {
	/// Target table, normally [`TENDERS_TABLE`].
	pub table: &'static str,
	/// Conjunction of filters.
	pub predicates: Vec<Predicate>,
	/// Result order; `None` leaves it to the store.
	pub ordering: Option<Ordering>,
}

impl TenderQuery {
	/// Every tender, newest first.
	pub fn all() -> Self {
		Self {
			table: TENDERS_TABLE,
			predicates: Vec::new(),
			ordering: Some(Ordering {
				column: Column::CreatedAt,
				ascending: false,
			}),
		}
	}

	/// The single tender with `tender_id`.
	pub fn by_id(tender_id: &str) -> Self {
		Self {
			table: TENDERS_TABLE,
			predicates: vec![Predicate::Equals {
				column: Column::TenderId,
				value: tender_id.to_string(),
			}],
			ordering: None,
		}
	}

	/// True when every predicate matches `tender`.
	pub fn matches(&self, tender: &Tender) -> bool {
		self.predicates.iter().all(|p| p.matches(tender))
	}
}

/// Errors reported by the hosted data store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
	/// The store could not be reached.
	#[error("Network error: {0}")]
	Network(String),

	/// The store rejected a predicate.
	#[error("Malformed query: {0}")]
	Malformed(String),

	/// No such table.
	#[error("Unknown table: {0}")]
	UnknownTable(String),

	/// Any other store-side failure.
	#[error("Data service error: {0}")]
	Service(String),
}

/// Read access to the hosted tenders table.
pub trait DataClient {
	/// Rows of `query.table` matching every predicate, in `query.ordering`.
	fn query(&self, query: &TenderQuery) -> Result<Vec<Tender>, QueryError>;

	/// Convenience lookup for the detail view.
	fn tender(&self, tender_id: &str) -> Result<Option<Tender>, QueryError> {
		Ok(self.query(&TenderQuery::by_id(tender_id))?.into_iter().next())
	}
}

/// Raw search form state. Empty fields apply no filter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TenderFilters {
	/// Matched against description or organization.
	pub keyword: String,
	/// Organization substring.
	pub organization: String,
	/// Category substring.
	pub category: String,
	/// Location substring.
	pub location: String,
	/// Minimum value in dollars.
	pub min_value: String,
	/// Maximum value in dollars.
	pub max_value: String,
	/// Deadline on or before this ISO date.
	pub deadline: String,
}

impl TenderFilters {
	/// True when any field is non-empty.
	pub fn is_active(&self) -> bool {
		[
			&self.keyword,
			&self.organization,
			&self.category,
			&self.location,
			&self.min_value,
			&self.max_value,
			&self.deadline,
		]
		.iter()
		.any(|field| !field.trim().is_empty())
	}

	/// Translates the form into a query, newest tenders first.
	pub fn to_query(&self) -> TenderQuery {
		let mut query = TenderQuery::all();
		let predicates = &mut query.predicates;

		if let Some(keyword) = non_empty(&self.keyword) {
			predicates.push(Predicate::AnyOf(vec![
				Predicate::Contains {
					column: Column::Description,
					needle: keyword.to_string(),
				},
				Predicate::Contains {
					column: Column::Organization,
					needle: keyword.to_string(),
				},
			]));
		}
		for (column, field) in [
			(Column::Organization, &self.organization),
			(Column::Category, &self.category),
			(Column::Location, &self.location),
		] {
			if let Some(needle) = non_empty(field) {
				predicates.push(Predicate::Contains {
					column,
					needle: needle.to_string(),
				});
			}
		}
		if let Some(value) = parse_amount("min_value", &self.min_value) {
			predicates.push(Predicate::AtLeast {
				column: Column::Value,
				value,
			});
		}
		if let Some(value) = parse_amount("max_value", &self.max_value) {
			predicates.push(Predicate::AtMost {
				column: Column::Value,
				value,
			});
		}
		if let Some(date) = non_empty(&self.deadline) {
			predicates.push(Predicate::OnOrBefore {
				column: Column::Deadline,
				date: date.to_string(),
			});
		}

		query
	}

	/// Current text of `field`.
	pub fn get(&self, field: FilterField) -> &str {
		match field {
			FilterField::Keyword => &self.keyword,
			FilterField::Organization => &self.organization,
			FilterField::Category => &self.category,
			FilterField::Location => &self.location,
			FilterField::MinValue => &self.min_value,
			FilterField::MaxValue => &self.max_value,
			FilterField::Deadline => &self.deadline,
		}
	}

	/// Replaces the text of `field`.
	pub fn set(&mut self, field: FilterField, value: String) {
		let slot = match field {
			FilterField::Keyword => &mut self.keyword,
			FilterField::Organization => &mut self.organization,
			FilterField::Category => &mut self.category,
			FilterField::Location => &mut self.location,
			FilterField::MinValue => &mut self.min_value,
			FilterField::MaxValue => &mut self.max_value,
			FilterField::Deadline => &mut self.deadline,
		};
		*slot = value;
	}
}

/// One input of the search form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum FilterField {
	Keyword,
	Organization,
	Category,
	Location,
	MinValue,
	MaxValue,
	Deadline,
}

impl FilterField {
	/// Fields of the advanced filter panel, in display order.
	pub const PANEL: [FilterField; 6] = [
		FilterField::Organization,
		FilterField::Category,
		FilterField::Location,
		FilterField::MinValue,
		FilterField::MaxValue,
		FilterField::Deadline,
	];

	/// Form label.
	pub fn label(self) -> &'static str {
		match self {
			FilterField::Keyword => "Keywords",
			FilterField::Organization => "Organization",
			FilterField::Category => "Category",
			FilterField::Location => "Location",
			FilterField::MinValue => "Min Value ($)",
			FilterField::MaxValue => "Max Value ($)",
			FilterField::Deadline => "Deadline Before",
		}
	}

	/// HTML `type` of the input.
	pub fn input_type(self) -> &'static str {
		match self {
			FilterField::Keyword => "search",
			FilterField::MinValue | FilterField::MaxValue => "number",
			FilterField::Deadline => "date",
			_ => "text",
		}
	}

	/// Input placeholder.
	pub fn placeholder(self) -> &'static str {
		match self {
			FilterField::Keyword => "Search tenders by keywords...",
			FilterField::Organization => "Enter organization",
			FilterField::Category => "Enter category",
			FilterField::Location => "Enter location",
			FilterField::MinValue => "0",
			FilterField::MaxValue => "1000000",
			FilterField::Deadline => "",
		}
	}
}

fn non_empty(field: &str) -> Option<&str> {
	let trimmed = field.trim();
	(!trimmed.is_empty()).then_some(trimmed)
}

/// Leading whole-dollar amount of a form field, read like the browser's
/// `parseInt`: `"500000abc"` is 500000, `"900000.75"` is 900000 and
/// `"1e6"` is 1. Fields without leading digits apply no filter.
fn parse_amount(name: &str, field: &str) -> Option<i64> {
	let raw = non_empty(field)?;
	let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
	let digits = unsigned.len() - unsigned.trim_start_matches(|c: char| c.is_ascii_digit()).len();
	let prefix = &raw[..raw.len() - unsigned.len() + digits];
	let parsed = if digits == 0 { None } else { prefix.parse::<i64>().ok() };
	if parsed.is_none() {
		log::warn!("tender-ai: ignoring unparsable {} filter {:?}", name, raw);
	}
	parsed
}

/// Evaluates queries over rows held in memory.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InMemoryTenders {
	rows: Vec<Tender>,
}

impl InMemoryTenders {
	/// Store over `rows`.
	pub fn new(rows: Vec<Tender>) -> Self {
		Self { rows }
	}

	/// Number of stored rows.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// True without rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

impl DataClient for InMemoryTenders {
	fn query(&self, query: &TenderQuery) -> Result<Vec<Tender>, QueryError> {
		if query.table != TENDERS_TABLE {
			return Err(QueryError::UnknownTable(query.table.to_string()));
		}

		let mut rows: Vec<Tender> = self
			.rows
			.iter()
			.filter(|t| query.matches(t))
			.cloned()
			.collect();

		if let Some(order) = query.ordering {
			rows.sort_by(|a, b| {
				let ord = compare(order.column, a, b);
				if order.ascending { ord } else { ord.reverse() }
			});
		}
		Ok(rows)
	}
}

fn compare(column: Column, a: &Tender, b: &Tender) -> CmpOrdering {
	match column {
		Column::Value => a.value.total_cmp(&b.value),
		_ => column.text(a).cmp(&column.text(b)),
	}
}

/// Number of pages for `count` results; never less than one.
pub fn total_pages(count: usize, per_page: usize) -> usize {
	count.div_ceil(per_page.max(1)).max(1)
}

/// The 1-based `page` of `rows`. Out-of-range pages are empty.
pub fn page<T>(rows: &[T], page: usize, per_page: usize) -> &[T] {
	let start = page.saturating_sub(1).saturating_mul(per_page).min(rows.len());
	let end = start.saturating_add(per_page).min(rows.len());
	&rows[start..end]
}

/// Compact dollar amount: `$2.5M`, `$890K`, `$950`.
pub fn format_value(value: f64) -> String {
	if value >= 1_000_000.0 {
		format!("${:.1}M", value / 1_000_000.0)
	} else if value >= 1_000.0 {
		format!("${:.0}K", value / 1_000.0)
	} else {
		format!("${}", value)
	}
}
