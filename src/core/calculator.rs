//! Document total calculation.
//!
//! Turns line items plus VAT, service-tax and discount percentages into a
//! subtotal, tax amounts and a grand total. Pure functions only; the document
//! service reruns them whenever items or rates change.
//!
//! Numeric input is never an error here: NaN, infinite or negative values are
//! treated as 0.

use crate::entities::DocumentType;
use serde::{Deserialize, Serialize};

/// One row as entered by the user, before pricing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItemInput {
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
}

/// A line item with its position and derived total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedLine {
    pub item_no: i32,
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Whether service tax is withheld from or added to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceTaxMode {
    /// `total = taxable + vat - service_tax`
    Withholding,
    /// `total = taxable + vat + service_tax`
    Additive,
}

impl DocumentType {
    /// Sign convention for the service-tax line of this document type.
    #[must_use]
    pub const fn service_tax_mode(self) -> ServiceTaxMode {
        match self {
            Self::PurchaseRequisition | Self::PurchaseOrder => ServiceTaxMode::Withholding,
            Self::WorkRequest | Self::WorkOrder => ServiceTaxMode::Additive,
        }
    }
}

/// Percentages applied to a document, each in the 0-100 range by convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rates {
    pub vat_rate: f64,
    pub service_tax_rate: f64,
    pub discount_rate: f64,
}

/// Derived amounts of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub vat_amount: f64,
    pub service_tax_amount: f64,
    pub total_amount: f64,
}

/// Maps invalid numeric input to 0.
#[must_use]
pub fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Sanitises a percentage into the 0-100 range.
#[must_use]
pub fn sanitize_rate(rate: f64) -> f64 {
    sanitize_amount(rate).min(100.0)
}

/// `base * rate / 100`. Multiplying before dividing keeps results like
/// `250 * 7 / 100 == 17.5` exact.
#[must_use]
pub fn percent_of(base: f64, rate: f64) -> f64 {
    base * sanitize_rate(rate) / 100.0
}

/// `quantity * unit_price` with both sides sanitised. A product that
/// overflows counts as 0, like any other non-finite amount.
#[must_use]
pub fn line_total(quantity: f64, unit_price: f64) -> f64 {
    sanitize_amount(sanitize_amount(quantity) * sanitize_amount(unit_price))
}

/// Ordered line items of one document.
///
/// Every mutation recomputes the touched row and renumbers the list so that
/// `item_no` always runs 1..n.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineItemList {
    lines: Vec<PricedLine>,
}

impl LineItemList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from raw inputs in the given order.
    #[must_use]
    pub fn from_inputs(inputs: &[LineItemInput]) -> Self {
        let mut list = Self::new();
        for input in inputs {
            list.add(input.clone());
        }
        list
    }

    /// Appends a row and returns its `item_no`.
    pub fn add(&mut self, input: LineItemInput) -> i32 {
        let line = price_line(0, input);
        self.lines.push(line);
        self.renumber();
        self.last_item_no()
    }

    /// Replaces the row at `item_no`. Returns `false` when there is no such row.
    pub fn update(&mut self, item_no: i32, input: LineItemInput) -> bool {
        match self.index_of(item_no) {
            Some(index) => {
                self.lines[index] = price_line(item_no, input);
                true
            }
            None => false,
        }
    }

    /// Removes the row at `item_no` and renumbers the rest.
    pub fn remove(&mut self, item_no: i32) -> Option<PricedLine> {
        let index = self.index_of(item_no)?;
        let removed = self.lines.remove(index);
        self.renumber();
        Some(removed)
    }

    #[must_use]
    pub fn lines(&self) -> &[PricedLine] {
        &self.lines
    }

    #[must_use]
    pub fn into_lines(self) -> Vec<PricedLine> {
        self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of every row's `total_price`.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(|line| line.total_price).sum()
    }

    fn index_of(&self, item_no: i32) -> Option<usize> {
        self.lines.iter().position(|line| line.item_no == item_no)
    }

    fn last_item_no(&self) -> i32 {
        self.lines.last().map_or(0, |line| line.item_no)
    }

    fn renumber(&mut self) {
        for (line, item_no) in self.lines.iter_mut().zip(1..) {
            line.item_no = item_no;
        }
    }
}

fn price_line(item_no: i32, input: LineItemInput) -> PricedLine {
    let quantity = sanitize_amount(input.quantity);
    let unit_price = sanitize_amount(input.unit_price);
    PricedLine {
        item_no,
        description: input.description.trim().to_string(),
        quantity,
        unit: input.unit.trim().to_string(),
        unit_price,
        total_price: line_total(quantity, unit_price),
    }
}

/// Computes totals from a subtotal.
#[must_use]
pub fn totals_from_subtotal(subtotal: f64, rates: Rates, mode: ServiceTaxMode) -> DocumentTotals {
    let subtotal = sanitize_amount(subtotal);
    let discount_amount = percent_of(subtotal, rates.discount_rate);
    let taxable = subtotal - discount_amount;
    let vat_amount = percent_of(taxable, rates.vat_rate);
    let service_tax_amount = percent_of(taxable, rates.service_tax_rate);
    let total_amount = match mode {
        ServiceTaxMode::Withholding => taxable + vat_amount - service_tax_amount,
        ServiceTaxMode::Additive => taxable + vat_amount + service_tax_amount,
    };

    DocumentTotals {
        subtotal,
        discount_amount,
        vat_amount,
        service_tax_amount,
        total_amount,
    }
}

/// Computes totals for a set of priced lines.
#[must_use]
pub fn compute_totals(lines: &[PricedLine], rates: Rates, mode: ServiceTaxMode) -> DocumentTotals {
    let subtotal = lines.iter().map(|line| line.total_price).sum();
    totals_from_subtotal(subtotal, rates, mode)
}

/// Prices raw inputs and computes totals in one step, using the sign
/// convention of `doc_type`.
#[must_use]
pub fn calculate_document(
    doc_type: DocumentType,
    inputs: &[LineItemInput],
    rates: Rates,
) -> (Vec<PricedLine>, DocumentTotals) {
    let list = LineItemList::from_inputs(inputs);
    let totals = compute_totals(list.lines(), rates, doc_type.service_tax_mode());
    (list.into_lines(), totals)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    fn item(quantity: f64, unit_price: f64) -> LineItemInput {
        LineItemInput {
            description: "item".to_string(),
            quantity,
            unit: "pcs".to_string(),
            unit_price,
        }
    }

    fn vat(rate: f64) -> Rates {
        Rates {
            vat_rate: rate,
            ..Rates::default()
        }
    }

    #[test]
    fn test_subtotal_is_sum_of_line_totals() {
        let list = LineItemList::from_inputs(&[item(2.0, 100.0), item(1.0, 50.0), item(3.0, 0.5)]);
        assert_eq!(list.subtotal(), 251.5);
    }

    #[test]
    fn test_empty_and_zero_lists() {
        let totals = compute_totals(&[], vat(7.0), ServiceTaxMode::Additive);
        assert_eq!(totals, DocumentTotals::default());

        let list = LineItemList::from_inputs(&[item(0.0, 100.0), item(5.0, 0.0)]);
        assert_eq!(list.subtotal(), 0.0);
    }

    #[test]
    fn test_vat_exact_for_common_rates() {
        let lines = LineItemList::from_inputs(&[item(2.0, 100.0), item(1.0, 50.0)]);
        for (rate, expected) in [(0.0, 0.0), (7.0, 17.5), (100.0, 250.0)] {
            let totals = compute_totals(lines.lines(), vat(rate), ServiceTaxMode::Additive);
            assert_eq!(totals.vat_amount, expected, "rate {rate}");
        }
    }

    #[test]
    fn test_worked_example() {
        let (lines, totals) = calculate_document(
            DocumentType::WorkRequest,
            &[item(2.0, 100.0), item(1.0, 50.0)],
            vat(7.0),
        );
        assert_eq!(lines.len(), 2);
        assert_eq!(totals.subtotal, 250.0);
        assert_eq!(totals.vat_amount, 17.5);
        assert_eq!(totals.total_amount, 267.5);
    }

    #[test]
    fn test_sign_convention_per_document_type() {
        let rates = Rates {
            vat_rate: 7.0,
            service_tax_rate: 3.0,
            discount_rate: 0.0,
        };
        let inputs = [item(1.0, 1000.0)];

        for doc_type in [DocumentType::PurchaseRequisition, DocumentType::PurchaseOrder] {
            let (_, totals) = calculate_document(doc_type, &inputs, rates);
            assert_eq!(totals.service_tax_amount, 30.0);
            assert_eq!(totals.total_amount, 1000.0 + 70.0 - 30.0);
        }
        for doc_type in [DocumentType::WorkRequest, DocumentType::WorkOrder] {
            let (_, totals) = calculate_document(doc_type, &inputs, rates);
            assert_eq!(totals.total_amount, 1000.0 + 70.0 + 30.0);
        }
    }

    #[test]
    fn test_discount_reduces_taxable_base() {
        let rates = Rates {
            vat_rate: 10.0,
            service_tax_rate: 0.0,
            discount_rate: 50.0,
        };
        let totals = totals_from_subtotal(200.0, rates, ServiceTaxMode::Additive);
        assert_eq!(totals.discount_amount, 100.0);
        assert_eq!(totals.vat_amount, 10.0);
        assert_eq!(totals.total_amount, 110.0);
    }

    #[test]
    fn test_invalid_numbers_default_to_zero() {
        assert_eq!(sanitize_amount(f64::NAN), 0.0);
        assert_eq!(sanitize_amount(f64::INFINITY), 0.0);
        assert_eq!(sanitize_amount(-3.0), 0.0);
        assert_eq!(line_total(-1.0, 10.0), 0.0);
        assert_eq!(percent_of(100.0, f64::NAN), 0.0);

        let totals = totals_from_subtotal(f64::NAN, vat(7.0), ServiceTaxMode::Withholding);
        assert_eq!(totals.total_amount, 0.0);
    }

    #[test]
    fn test_rates_are_capped_at_one_hundred() {
        assert_eq!(sanitize_rate(150.0), 100.0);
        assert_eq!(sanitize_rate(-5.0), 0.0);

        let rates = Rates {
            vat_rate: 7.0,
            service_tax_rate: 0.0,
            discount_rate: 150.0,
        };
        let totals = totals_from_subtotal(1000.0, rates, ServiceTaxMode::Additive);
        assert_eq!(totals.discount_amount, 1000.0);
        assert_eq!(totals.vat_amount, 0.0);
        assert_eq!(totals.total_amount, 0.0);

        let totals = totals_from_subtotal(200.0, vat(250.0), ServiceTaxMode::Additive);
        assert_eq!(totals.vat_amount, 200.0);
    }

    #[test]
    fn test_overflowing_line_counts_as_zero() {
        let list = LineItemList::from_inputs(&[item(1e200, 1e200), item(2.0, 100.0)]);
        assert_eq!(list.lines()[0].total_price, 0.0);
        assert_eq!(list.lines()[1].total_price, 200.0);

        let totals = compute_totals(list.lines(), vat(0.0), ServiceTaxMode::Additive);
        let line_sum: f64 = list.lines().iter().map(|line| line.total_price).sum();
        assert_eq!(totals.subtotal, line_sum);
        assert_eq!(totals.subtotal, 200.0);
    }

    #[test]
    fn test_rows_are_renumbered_on_add_and_remove() {
        let mut list = LineItemList::new();
        assert_eq!(list.add(item(1.0, 1.0)), 1);
        assert_eq!(list.add(item(2.0, 1.0)), 2);
        assert_eq!(list.add(item(3.0, 1.0)), 3);

        let removed = list.remove(2).map(|line| line.quantity);
        assert_eq!(removed, Some(2.0));
        let numbers: Vec<i32> = list.lines().iter().map(|line| line.item_no).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(list.lines()[1].quantity, 3.0);

        assert!(list.remove(7).is_none());
    }

    #[test]
    fn test_update_recomputes_line_total() {
        let mut list = LineItemList::from_inputs(&[item(1.0, 10.0)]);
        assert!(list.update(1, item(4.0, 2.5)));
        assert_eq!(list.lines()[0].total_price, 10.0);
        assert_eq!(list.lines()[0].item_no, 1);
        assert!(!list.update(2, item(1.0, 1.0)));
    }
}
