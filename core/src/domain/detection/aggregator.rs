use std::collections::HashMap;

use crate::domain::detection::entities::{
    ClassDetail, DetectionRecord, DetectionSummary, LegacyResult,
};

/// Occurrences per class label, in the order each label was first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassCount {
    entries: Vec<ClassDetail>,
}

impl ClassCount {
    pub fn tally<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let mut entries: Vec<ClassDetail> = Vec::new();
        let mut positions: HashMap<&'a str, usize> = HashMap::new();

        for label in labels {
            match positions.get(label) {
                Some(&index) => entries[index].count += 1,
                None => {
                    positions.insert(label, entries.len());
                    entries.push(ClassDetail {
                        class: label.to_string(),
                        count: 1,
                    });
                }
            }
        }

        Self { entries }
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }

    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, class: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| entry.class == class)
            .map(|entry| entry.count)
    }

    pub fn sorted_classes(&self) -> Vec<String> {
        let mut classes: Vec<String> = self.entries.iter().map(|e| e.class.clone()).collect();
        classes.sort();
        classes
    }

    pub fn details(&self) -> &[ClassDetail] {
        &self.entries
    }

    pub fn legacy_result(&self) -> LegacyResult {
        match self.entries.as_slice() {
            [only] => LegacyResult::Summary(format!("{} {}", only.count, only.class)),
            _ => LegacyResult::Breakdown {
                ingredients: self.total(),
                details: self.entries.clone(),
            },
        }
    }
}

pub fn summarize(predictions: &[DetectionRecord]) -> DetectionSummary {
    let counts = ClassCount::tally(predictions.iter().map(|p| p.class.as_str()));

    DetectionSummary {
        detected_ingredients: counts.sorted_classes(),
        ingredients: counts.total(),
        details: counts.details().to_vec(),
        result: counts.legacy_result(),
    }
}
