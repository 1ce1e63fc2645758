//! GRID Token Security & Audit Log
//!
//! Append-only records of security audits, suspicious-activity reports and
//! emergency operations, keyed by incrementing ids. The only influence this
//! crate has on the rest of the system is the suspicious-activity counter,
//! which refreshes the last-security-review timestamp once it crosses a
//! threshold. Nothing here is ever mutated after creation.

use serde::{Deserialize, Serialize};

use grid_core::Address;

/// Suspicious-activity reports required to trigger a security review.
pub const REVIEW_TRIGGER_THRESHOLD: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityAudit {
    pub id: u64,
    pub auditor: Address,
    pub report_hash: String,
    pub passed: bool,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspiciousActivityReport {
    pub id: u64,
    pub reporter: Address,
    pub subject: Address,
    pub category: String,
    pub details: String,
    pub timestamp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyOperation {
    pub id: u64,
    pub operator: Address,
    pub action: String,
    pub amount: u64,
    pub justification: String,
    pub timestamp: u64,
}

/// Summary view of the security monitoring state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonitoringStatus {
    pub total_reports: u64,
    pub reports_since_last_review: u64,
    pub last_security_review: u64,
    pub total_audits: u64,
    pub last_audit_passed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditLog {
    audits: Vec<SecurityAudit>,
    reports: Vec<SuspiciousActivityReport>,
    emergency_ops: Vec<EmergencyOperation>,
    reports_since_last_review: u64,
    last_security_review: u64,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit_audit(
        &mut self,
        auditor: &str,
        report_hash: String,
        passed: bool,
        now: u64,
    ) -> u64 {
        let id = self.audits.len() as u64 + 1;
        self.audits.push(SecurityAudit {
            id,
            auditor: auditor.to_string(),
            report_hash,
            passed,
            timestamp: now,
        });
        id
    }

    pub fn latest_audit(&self) -> Option<&SecurityAudit> {
        self.audits.last()
    }

    /// Record a suspicious-activity report. Once the counter crosses the
    /// review threshold the last-review timestamp is refreshed and the
    /// counter rearms. That timestamp update is this log's entire influence
    /// on the rest of the system.
    pub fn report_suspicious_activity(
        &mut self,
        reporter: &str,
        subject: &str,
        category: String,
        details: String,
        now: u64,
    ) -> u64 {
        let id = self.reports.len() as u64 + 1;
        self.reports.push(SuspiciousActivityReport {
            id,
            reporter: reporter.to_string(),
            subject: subject.to_string(),
            category,
            details,
            timestamp: now,
        });
        self.reports_since_last_review += 1;
        if self.reports_since_last_review >= REVIEW_TRIGGER_THRESHOLD {
            self.last_security_review = now;
            self.reports_since_last_review = 0;
        }
        id
    }

    pub fn log_emergency_operation(
        &mut self,
        operator: &str,
        action: String,
        amount: u64,
        justification: String,
        now: u64,
    ) -> u64 {
        let id = self.emergency_ops.len() as u64 + 1;
        self.emergency_ops.push(EmergencyOperation {
            id,
            operator: operator.to_string(),
            action,
            amount,
            justification,
            timestamp: now,
        });
        id
    }

    pub fn emergency_operation(&self, id: u64) -> Option<&EmergencyOperation> {
        // ids are 1-based indexes into the append-only vector
        id.checked_sub(1)
            .and_then(|idx| self.emergency_ops.get(idx as usize))
    }

    pub fn monitoring_status(&self) -> MonitoringStatus {
        MonitoringStatus {
            total_reports: self.reports.len() as u64,
            reports_since_last_review: self.reports_since_last_review,
            last_security_review: self.last_security_review,
            total_audits: self.audits.len() as u64,
            last_audit_passed: self.audits.last().map(|a| a.passed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audit_submission() {
        let mut log = AuditLog::new();

        let id = log.submit_audit("auditor1", "0xabc".to_string(), true, 1_000);
        assert_eq!(id, 1);
        assert_eq!(log.latest_audit().unwrap().report_hash, "0xabc");
        assert_eq!(log.monitoring_status().last_audit_passed, Some(true));
    }

    #[test]
    fn test_review_triggered_by_report_volume() {
        let mut log = AuditLog::new();

        for i in 0..REVIEW_TRIGGER_THRESHOLD - 1 {
            log.report_suspicious_activity(
                "watcher",
                "suspect",
                "wash-trading".to_string(),
                String::new(),
                1_000 + i,
            );
        }
        assert_eq!(log.monitoring_status().last_security_review, 0);

        log.report_suspicious_activity(
            "watcher",
            "suspect",
            "wash-trading".to_string(),
            String::new(),
            2_000,
        );
        let status = log.monitoring_status();
        assert_eq!(status.last_security_review, 2_000);
        assert_eq!(status.reports_since_last_review, 0);
        assert_eq!(status.total_reports, REVIEW_TRIGGER_THRESHOLD);
    }

    #[test]
    fn test_emergency_operation_lookup() {
        let mut log = AuditLog::new();

        let id = log.log_emergency_operation(
            "carol",
            "emergency_mint".to_string(),
            5_000,
            "exchange hack recovery".to_string(),
            3_000,
        );
        let op = log.emergency_operation(id).unwrap();
        assert_eq!(op.operator, "carol");
        assert_eq!(op.amount, 5_000);
        assert!(log.emergency_operation(0).is_none());
        assert!(log.emergency_operation(99).is_none());
    }
}
