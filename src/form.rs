//! Research form model and value collection
//!
//! The form is plain data: four sections of typed elements. The TUI edits it in
//! place, the CLI fills it from `--set` pairs or a TOML file, and
//! `collect_section` turns a section into the mapping stored in an observation.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Result, TradebookError};
use crate::observation::{FieldValue, Section, SectionData};

/// Field ids of the sentiment inputs feeding the chart
pub const BULLISH_FIELD: &str = "bullishPercentage";
pub const BEARISH_FIELD: &str = "bearishPercentage";

/// Input element type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    Text,
    Number,
    TextArea,
    Select { options: Vec<String> },
    Checkbox { checked: bool },
    Radio { checked: bool },
}

/// One input element. Checkbox and radio elements sharing an `id` form a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormElement {
    pub id: String,
    pub label: String,
    pub kind: ElementKind,
    pub value: String,
}

impl FormElement {
    pub fn text(id: &str, label: &str) -> Self {
        Self::new(id, label, ElementKind::Text, "")
    }

    pub fn number(id: &str, label: &str) -> Self {
        Self::new(id, label, ElementKind::Number, "")
    }

    pub fn textarea(id: &str, label: &str) -> Self {
        Self::new(id, label, ElementKind::TextArea, "")
    }

    pub fn select(id: &str, label: &str, options: &[&str]) -> Self {
        let mut all = vec![String::new()];
        all.extend(options.iter().map(|o| o.to_string()));
        Self::new(id, label, ElementKind::Select { options: all }, "")
    }

    pub fn checkbox(id: &str, value: &str) -> Self {
        Self::new(id, value, ElementKind::Checkbox { checked: false }, value)
    }

    pub fn radio(id: &str, value: &str) -> Self {
        Self::new(id, value, ElementKind::Radio { checked: false }, value)
    }

    fn new(id: &str, label: &str, kind: ElementKind, value: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            value: value.to_string(),
        }
    }

    pub fn is_checked(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Checkbox { checked: true } | ElementKind::Radio { checked: true }
        )
    }

    /// Checkbox and radio elements belong to a group named by their id
    pub fn is_group_member(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Checkbox { .. } | ElementKind::Radio { .. }
        )
    }

    /// Whether typed characters edit this element's value
    pub fn accepts_text(&self) -> bool {
        matches!(
            self.kind,
            ElementKind::Text | ElementKind::Number | ElementKind::TextArea
        )
    }

    /// Step a select element through its options
    pub fn cycle_option(&mut self, forward: bool) {
        let ElementKind::Select { options } = &self.kind else {
            return;
        };
        if options.is_empty() {
            return;
        }
        let idx = options.iter().position(|o| *o == self.value).unwrap_or(0);
        let next = if forward {
            (idx + 1) % options.len()
        } else {
            (idx + options.len() - 1) % options.len()
        };
        self.value = options[next].clone();
    }
}

/// Elements of one section, in display order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSection {
    pub section: Section,
    pub elements: Vec<FormElement>,
}

impl FormSection {
    pub fn new(section: Section, elements: Vec<FormElement>) -> Self {
        Self { section, elements }
    }

    /// Distinct element ids, in first-appearance order
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = Vec::new();
        for el in &self.elements {
            if !ids.contains(&el.id.as_str()) {
                ids.push(&el.id);
            }
        }
        ids
    }
}

/// Gather every element's current value into a section mapping.
///
/// Checkbox groups accumulate checked values into a list (empty when none is
/// checked), radio groups record the checked value (empty when none is), and
/// every other element records its raw value.
pub fn collect_section(section: &FormSection) -> SectionData {
    let mut data = SectionData::new();
    for el in &section.elements {
        match el.kind {
            ElementKind::Checkbox { checked } => {
                let entry = data
                    .entry(el.id.clone())
                    .or_insert_with(|| FieldValue::Multi(Vec::new()));
                if checked {
                    if let FieldValue::Multi(values) = entry {
                        values.push(el.value.clone());
                    }
                }
            }
            ElementKind::Radio { checked } => {
                if checked {
                    data.insert(el.id.clone(), FieldValue::Text(el.value.clone()));
                } else {
                    data.entry(el.id.clone())
                        .or_insert_with(|| FieldValue::Text(String::new()));
                }
            }
            _ => {
                data.insert(el.id.clone(), FieldValue::Text(el.value.clone()));
            }
        }
    }
    data
}

/// Position of one element inside a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementPos {
    pub section: usize,
    pub element: usize,
}

/// The whole research form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchForm {
    pub sections: Vec<FormSection>,
}

impl Default for ResearchForm {
    fn default() -> Self {
        Self::research_layout()
    }
}

impl ResearchForm {
    pub fn new(sections: Vec<FormSection>) -> Self {
        Self { sections }
    }

    /// The journal's standard research form
    pub fn research_layout() -> Self {
        Self::new(vec![
            FormSection::new(
                Section::BuyersResearch,
                vec![
                    FormElement::select(
                        "marketControl",
                        "Market Control",
                        &["Buyers", "Sellers", "Balanced"],
                    ),
                    FormElement::text("keyLevels", "Key Levels"),
                    FormElement::select(
                        "volumeProfile",
                        "Volume Profile",
                        &["Increasing", "Decreasing", "Flat"],
                    ),
                    FormElement::textarea("buyersNotes", "Notes"),
                ],
            ),
            FormSection::new(
                Section::EconomicOutlook,
                vec![
                    FormElement::select("usdOutlook", "USD Outlook", &["Bullish", "Bearish", "Neutral"]),
                    FormElement::text("interestRates", "Interest Rates"),
                    FormElement::text("inflation", "Inflation Trend"),
                    FormElement::checkbox("economicEvents", "CPI"),
                    FormElement::checkbox("economicEvents", "NFP"),
                    FormElement::checkbox("economicEvents", "FOMC"),
                    FormElement::checkbox("economicEvents", "GDP"),
                    FormElement::checkbox("economicEvents", "PMI"),
                    FormElement::textarea("outlookNotes", "Notes"),
                ],
            ),
            FormSection::new(
                Section::MarketSentiments,
                vec![
                    FormElement::number(BULLISH_FIELD, "Bullish %"),
                    FormElement::number(BEARISH_FIELD, "Bearish %"),
                    FormElement::radio("riskMood", "Risk-On"),
                    FormElement::radio("riskMood", "Risk-Off"),
                    FormElement::radio("riskMood", "Mixed"),
                    FormElement::textarea("sentimentDrivers", "Sentiment Drivers"),
                ],
            ),
            FormSection::new(
                Section::TradingObservations,
                vec![
                    FormElement::radio("tradingBias", "Long"),
                    FormElement::radio("tradingBias", "Short"),
                    FormElement::radio("tradingBias", "Neutral"),
                    FormElement::text("entryTarget", "Entry Target"),
                    FormElement::text("stopLoss", "Stop Loss"),
                    FormElement::text("takeProfit", "Take Profit"),
                    FormElement::checkbox("setups", "Asia Sweep"),
                    FormElement::checkbox("setups", "EAB"),
                    FormElement::checkbox("setups", "Breakout"),
                    FormElement::checkbox("setups", "Reversal"),
                    FormElement::textarea("observationNotes", "Notes"),
                ],
            ),
        ])
    }

    pub fn section(&self, section: Section) -> Option<&FormSection> {
        self.sections.iter().find(|s| s.section == section)
    }

    fn section_mut(&mut self, section: Section) -> Option<&mut FormSection> {
        self.sections.iter_mut().find(|s| s.section == section)
    }

    /// Every element position, in display order
    pub fn positions(&self) -> Vec<ElementPos> {
        self.sections
            .iter()
            .enumerate()
            .flat_map(|(s, section)| {
                (0..section.elements.len()).map(move |e| ElementPos {
                    section: s,
                    element: e,
                })
            })
            .collect()
    }

    pub fn element(&self, pos: ElementPos) -> Option<&FormElement> {
        self.sections.get(pos.section)?.elements.get(pos.element)
    }

    pub fn element_mut(&mut self, pos: ElementPos) -> Option<&mut FormElement> {
        self.sections.get_mut(pos.section)?.elements.get_mut(pos.element)
    }

    /// Toggle a checkbox, or check a radio and clear the rest of its group
    pub fn activate(&mut self, pos: ElementPos) {
        let Some(section) = self.sections.get_mut(pos.section) else {
            return;
        };
        let Some(target) = section.elements.get(pos.element) else {
            return;
        };
        let (kind, group) = (target.kind.clone(), target.id.clone());
        match kind {
            ElementKind::Checkbox { checked } => {
                section.elements[pos.element].kind = ElementKind::Checkbox { checked: !checked };
            }
            ElementKind::Radio { .. } => {
                for (i, el) in section.elements.iter_mut().enumerate() {
                    if el.id == group {
                        el.kind = ElementKind::Radio {
                            checked: i == pos.element,
                        };
                    }
                }
            }
            _ => {}
        }
    }

    /// Set a field by section and id.
    ///
    /// Radio groups take the value to check, checkbox groups a comma-separated
    /// list of values to check, select elements one of their options.
    pub fn set_value(&mut self, section: Section, id: &str, value: &str) -> Result<()> {
        let form_section = self
            .section_mut(section)
            .ok_or_else(|| TradebookError::UnknownField(format!("{section}.{id}")))?;

        let group: Vec<usize> = form_section
            .elements
            .iter()
            .enumerate()
            .filter(|(_, el)| el.id == id)
            .map(|(i, _)| i)
            .collect();
        let Some(&first) = group.first() else {
            return Err(TradebookError::UnknownField(format!("{section}.{id}")));
        };

        let kind = form_section.elements[first].kind.clone();
        match kind {
            ElementKind::Checkbox { .. } => {
                let wanted: Vec<String> = value
                    .split(',')
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect();
                for w in &wanted {
                    let known = group
                        .iter()
                        .any(|&i| form_section.elements[i].value.eq_ignore_ascii_case(w));
                    if !known {
                        return Err(TradebookError::Validation(format!(
                            "'{w}' is not an option of {section}.{id}"
                        )));
                    }
                }
                for &i in &group {
                    let el = &mut form_section.elements[i];
                    let checked = wanted.iter().any(|w| el.value.eq_ignore_ascii_case(w));
                    el.kind = ElementKind::Checkbox { checked };
                }
            }
            ElementKind::Radio { .. } => {
                let target = group
                    .iter()
                    .copied()
                    .find(|&i| form_section.elements[i].value.eq_ignore_ascii_case(value.trim()));
                if target.is_none() && !value.trim().is_empty() {
                    return Err(TradebookError::Validation(format!(
                        "'{value}' is not an option of {section}.{id}"
                    )));
                }
                for &i in &group {
                    form_section.elements[i].kind = ElementKind::Radio {
                        checked: Some(i) == target,
                    };
                }
            }
            ElementKind::Select { options } => {
                let option = options
                    .iter()
                    .find(|o| o.eq_ignore_ascii_case(value.trim()))
                    .cloned()
                    .ok_or_else(|| {
                        TradebookError::Validation(format!(
                            "'{value}' is not an option of {section}.{id}"
                        ))
                    })?;
                form_section.elements[first].value = option;
            }
            _ => {
                form_section.elements[first].value = value.to_string();
            }
        }
        Ok(())
    }

    /// Apply a `section.field=value` assignment
    pub fn set_assignment(&mut self, assignment: &str) -> Result<()> {
        let (path, value) = assignment.split_once('=').ok_or_else(|| {
            TradebookError::Validation(format!(
                "expected section.field=value, got '{assignment}'"
            ))
        })?;
        let (section, id) = path
            .trim()
            .split_once('.')
            .ok_or_else(|| TradebookError::UnknownField(path.to_string()))?;
        self.set_value(section.parse()?, id, value)
    }

    /// Fill the form from a TOML document keyed by section then field id.
    /// Arrays set checkbox groups.
    pub fn fill_from_toml(&mut self, content: &str) -> Result<()> {
        let doc: BTreeMap<String, BTreeMap<String, TomlField>> = toml::from_str(content)?;
        for (section_key, fields) in doc {
            let section: Section = section_key.parse()?;
            for (id, field) in fields {
                let value = match field {
                    TomlField::One(v) => v,
                    TomlField::Many(values) => values.join(","),
                };
                self.set_value(section, &id, &value)?;
            }
        }
        Ok(())
    }

    /// Raw bullish/bearish input text
    pub fn sentiment_inputs(&self) -> (String, String) {
        let raw = |id: &str| {
            self.section(Section::MarketSentiments)
                .and_then(|s| s.elements.iter().find(|el| el.id == id))
                .map(|el| el.value.clone())
                .unwrap_or_default()
        };
        (raw(BULLISH_FIELD), raw(BEARISH_FIELD))
    }

    /// Clear every value and check box
    pub fn reset(&mut self) {
        for section in &mut self.sections {
            for el in &mut section.elements {
                match &mut el.kind {
                    ElementKind::Checkbox { checked } | ElementKind::Radio { checked } => {
                        *checked = false
                    }
                    _ => el.value.clear(),
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TomlField {
    One(String),
    Many(Vec<String>),
}
