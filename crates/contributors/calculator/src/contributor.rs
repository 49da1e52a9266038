use std::any::Any;
use std::sync::Arc;

use everywhere_contributor_api::{
	Contributor, ContributorDescriptor, ContributorError, ContributorFactory, Element,
	FoundItem, ResultSink, SelectionModifiers, SessionContext,
};
use log::debug;
use parking_lot::Mutex;

use crate::evaluate::evaluate;

pub static CALCULATOR: ContributorDescriptor =
	ContributorDescriptor::new("calculator", "Calculator", 50)
		.hidden_tab()
		.with_max_results(1);

/// Weight of the single calculator result; it outranks fuzzy matches.
const RESULT_WEIGHT: i32 = 10_000;

/// The evaluated value of a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationElement {
	expression: String,
	value: String,
}

impl CalculationElement {
	#[must_use]
	pub fn new(expression: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			expression: expression.into(),
			value: value.into(),
		}
	}

	#[must_use]
	pub fn expression(&self) -> &str {
		&self.expression
	}

	#[must_use]
	pub fn value(&self) -> &str {
		&self.value
	}
}

impl Element for CalculationElement {
	fn text(&self) -> &str {
		&self.value
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CalculatorFactory;

impl ContributorFactory for CalculatorFactory {
	fn descriptor(&self) -> &'static ContributorDescriptor {
		&CALCULATOR
	}

	fn create(
		&self,
		_context: &Arc<SessionContext>,
	) -> Result<Arc<dyn Contributor>, ContributorError> {
		Ok(Arc::new(CalculatorContributor::new()))
	}
}

/// Evaluates queries that look like arithmetic.
#[derive(Debug, Default)]
pub struct CalculatorContributor {
	copied: Mutex<Option<String>>,
}

impl CalculatorContributor {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Value copied by the last selection.
	#[must_use]
	pub fn copied(&self) -> Option<String> {
		self.copied.lock().clone()
	}
}

impl Contributor for CalculatorContributor {
	fn descriptor(&self) -> &'static ContributorDescriptor {
		&CALCULATOR
	}

	fn fetch(&self, pattern: &str, sink: &mut ResultSink<'_>) -> Result<(), ContributorError> {
		let expression = pattern.trim();
		if !expression.chars().any(|c| c.is_ascii_digit()) {
			return Ok(());
		}
		match evaluate(expression) {
			Ok(value) => {
				sink.push(
					Arc::new(CalculationElement::new(expression, value)),
					RESULT_WEIGHT,
				);
			}
			Err(err) => debug!("calculator skipped '{expression}': {err}"),
		}
		Ok(())
	}

	fn process_selected_item(
		&self,
		item: &FoundItem,
		_modifiers: SelectionModifiers,
		_search_text: &str,
	) -> bool {
		let Some(calculation) = item.element().as_any().downcast_ref::<CalculationElement>() else {
			return false;
		};
		*self.copied.lock() = Some(calculation.value().to_string());
		true
	}
}
