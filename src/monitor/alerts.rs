// Active alert book: ordered, deduplicated per kind, capped

use std::collections::VecDeque;

use crate::models::{Alert, AlertKind, AlertSeverity, now_rfc3339};

#[derive(Debug)]
pub(crate) struct AlertBook {
    active: VecDeque<Alert>,
    max_alerts: usize,
    next_id: u64,
}

/// Everything about a breach except its id and timestamp.
pub(crate) struct Breach {
    pub(crate) kind: AlertKind,
    pub(crate) severity: AlertSeverity,
    pub(crate) value: f64,
    pub(crate) threshold: f64,
    pub(crate) message: String,
}

impl AlertBook {
    pub(crate) fn new(max_alerts: usize) -> Self {
        Self {
            active: VecDeque::new(),
            max_alerts,
            next_id: 1,
        }
    }

    pub(crate) fn is_active(&self, kind: AlertKind) -> bool {
        self.active.iter().any(|a| a.kind == kind)
    }

    /// Records a breach unless an alert of the same kind is already active.
    /// Returns the newly raised alert.
    pub(crate) fn raise(&mut self, breach: Breach) -> Option<Alert> {
        if self.is_active(breach.kind) {
            return None;
        }
        let alert = Alert {
            id: self.next_id,
            kind: breach.kind,
            severity: breach.severity,
            metric: breach.kind.metric().to_string(),
            value: breach.value,
            threshold: breach.threshold,
            message: breach.message,
            timestamp: now_rfc3339(),
        };
        self.next_id += 1;
        while !self.active.is_empty() && self.active.len() >= self.max_alerts {
            self.active.pop_front();
        }
        self.active.push_back(alert.clone());
        Some(alert)
    }

    pub(crate) fn snapshot(&self) -> Vec<Alert> {
        self.active.iter().cloned().collect()
    }

    pub(crate) fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breach(kind: AlertKind) -> Breach {
        Breach {
            kind,
            severity: AlertSeverity::Warning,
            value: 2.0,
            threshold: 1.0,
            message: "test".into(),
        }
    }

    #[test]
    fn test_raise_dedupes_by_kind() {
        let mut book = AlertBook::new(10);
        assert!(book.raise(breach(AlertKind::HighLatency)).is_some());
        assert!(book.raise(breach(AlertKind::HighLatency)).is_none());
        assert!(book.raise(breach(AlertKind::LowRps)).is_some());
        let kinds: Vec<_> = book.snapshot().iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::HighLatency, AlertKind::LowRps]);
    }

    #[test]
    fn test_cap_drops_oldest() {
        let mut book = AlertBook::new(2);
        book.raise(breach(AlertKind::HighLatency));
        book.raise(breach(AlertKind::HighErrorRate));
        book.raise(breach(AlertKind::LowRps));
        let kinds: Vec<_> = book.snapshot().iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AlertKind::HighErrorRate, AlertKind::LowRps]);
    }

    #[test]
    fn test_ids_survive_clear() {
        let mut book = AlertBook::new(10);
        let first = book.raise(breach(AlertKind::HighLatency)).map(|a| a.id);
        book.clear();
        assert!(book.snapshot().is_empty());
        let second = book.raise(breach(AlertKind::HighLatency)).map(|a| a.id);
        assert_eq!(first, Some(1));
        assert_eq!(second, Some(2));
    }
}
