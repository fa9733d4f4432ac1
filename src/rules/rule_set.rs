//! Policy rule composition.
//!
//! [`PolicyRuleSet`] owns the configured policy tables and evaluates every
//! rule for one request, producing the [`RuleFacts`] handed to the prompt
//! composer together with an audit step per rule.

use chrono::NaiveDate;
use serde_json::json;

use crate::config::{CalendarConfig, EngineConfig, PolicyConfig};
use crate::models::{AuditStep, DateInterval, Employee, RuleFacts};

use super::{
    EntitlementTable, UrgencyKeywords, calculate_tenure, count_working_days,
    find_bridged_holiday, find_restricted_overlap, priority_rank, summer_quota_exceeded,
};

/// The facts computed for one request and how each was reached.
#[derive(Debug, Clone)]
pub struct RuleEvaluation {
    /// The policy facts.
    pub facts: RuleFacts,
    /// One audit step per rule, in evaluation order.
    pub audit_steps: Vec<AuditStep>,
}

/// Independent policy predicates over a request, built from configuration.
///
/// # Example
///
/// ```no_run
/// use leave_adjudicator::config::ConfigLoader;
/// use leave_adjudicator::models::{Employee, Position};
/// use leave_adjudicator::rules::{PolicyRuleSet, parse_date_range};
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/leave_policy")?;
/// let rules = PolicyRuleSet::from_config(loader.config());
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Ayşe Yılmaz".to_string(),
///     position: Position::Uzman,
///     position_level: 2,
///     hire_date: NaiveDate::from_ymd_opt(2014, 6, 1).unwrap(),
///     remaining_days: 20,
/// };
/// let interval = parse_date_range("22.04.2024-24.04.2024")?;
/// let evaluation = rules.evaluate(
///     &interval,
///     "Yıllık izin",
///     &employee,
///     NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
/// );
/// assert!(evaluation.facts.bridges_holiday);
/// # Ok::<(), leave_adjudicator::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PolicyRuleSet {
    policy: PolicyConfig,
    calendar: CalendarConfig,
    entitlement: EntitlementTable,
    urgency: UrgencyKeywords,
}

impl PolicyRuleSet {
    /// Builds the rule set from the loaded configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            policy: config.policy().clone(),
            calendar: config.calendar().clone(),
            entitlement: EntitlementTable::new(config.policy().entitlement_tiers.clone()),
            urgency: UrgencyKeywords::new(config.keywords()),
        }
    }

    /// Returns the policy thresholds this rule set applies.
    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    /// Evaluates every rule for a request.
    pub fn evaluate(
        &self,
        interval: &DateInterval,
        description: &str,
        employee: &Employee,
        evaluation_date: NaiveDate,
    ) -> RuleEvaluation {
        let mut audit = StepRecorder::default();
        let interval_json = json!({ "start": interval.start(), "end": interval.end() });

        let calendar_days = interval.calendar_days();
        let working_days = count_working_days(interval, self.policy.rest_day);
        audit.record(
            "working_days",
            "Working Day Count",
            json!({ "interval": interval_json, "rest_day": self.policy.rest_day.to_string() }),
            json!({ "calendar_days": calendar_days, "working_days": working_days }),
            format!(
                "{} calendar days, {} excluded as rest days ({})",
                calendar_days,
                calendar_days - working_days,
                self.policy.rest_day
            ),
        );

        let tenure = calculate_tenure(employee.hire_date, evaluation_date, &self.policy.tenure);
        audit.record(
            "tenure",
            "Tenure Calculation",
            json!({ "hire_date": employee.hire_date, "evaluation_date": evaluation_date }),
            json!({
                "service_days": tenure.service_days,
                "tenure_years": tenure.tenure_years,
                "has_minimum_service": tenure.has_minimum_service,
            }),
            format!(
                "{} days of service; minimum service of {} days {}",
                tenure.service_days,
                self.policy.tenure.minimum_service_days,
                if tenure.has_minimum_service { "met" } else { "not met" }
            ),
        );

        let entitlement_days = self.entitlement.entitlement_for(tenure.tenure_years);
        audit.record(
            "entitlement",
            "Annual Entitlement",
            json!({ "tenure_years": tenure.tenure_years }),
            json!({ "entitlement_days": entitlement_days }),
            format!(
                "{} years of tenure grants {} days per year",
                tenure.tenure_years, entitlement_days
            ),
        );

        let exceeds_remaining_balance = working_days > employee.remaining_days;
        audit.record(
            "remaining_balance",
            "Remaining Balance",
            json!({ "working_days": working_days, "remaining_days": employee.remaining_days }),
            json!({ "exceeds_remaining_balance": exceeds_remaining_balance }),
            format!(
                "{} working days requested against {} remaining",
                working_days, employee.remaining_days
            ),
        );

        let restricted_overlap =
            find_restricted_overlap(interval, &self.calendar.restricted_periods);
        audit.record(
            "restricted_period",
            "Restricted Period Overlap",
            json!({ "interval": interval_json, "windows": self.calendar.restricted_periods.len() }),
            serde_json::to_value(&restricted_overlap).unwrap_or_default(),
            match &restricted_overlap.reason_label {
                Some(label) => format!("Overlaps restricted period '{}'", label),
                None => "No restricted period overlaps the request".to_string(),
            },
        );

        let quota = &self.policy.summer_quota;
        let summer_quota_exceeded = summer_quota_exceeded(interval, working_days, quota);
        audit.record(
            "summer_quota",
            "Summer Quota",
            json!({
                "interval": interval_json,
                "season_start": quota.season_start,
                "season_end": quota.season_end,
                "max_working_days": quota.max_working_days,
                "working_days": working_days,
            }),
            json!({ "summer_quota_exceeded": summer_quota_exceeded }),
            if summer_quota_exceeded {
                format!(
                    "Request inside the season takes {} working days, above the cap of {}",
                    working_days, quota.max_working_days
                )
            } else {
                "Request is outside the season or within the cap".to_string()
            },
        );

        let bridged = find_bridged_holiday(interval, &self.calendar.holidays);
        audit.record(
            "bridge_holiday",
            "Holiday Bridging",
            json!({ "interval": interval_json, "holidays": self.calendar.holidays.len() }),
            json!({
                "bridges_holiday": bridged.is_some(),
                "holiday": bridged.map(|h| h.date),
            }),
            match bridged {
                Some(holiday) => format!(
                    "Covers the days before and after {} ({}); one extra day is recommended",
                    holiday.name, holiday.date
                ),
                None => "No holiday is bridged".to_string(),
            },
        );

        let urgency = self.urgency.detect(description);
        audit.record(
            "first_degree_urgency",
            "First-Degree Relative Urgency",
            json!({ "description": description }),
            json!({
                "first_degree_urgent": urgency.is_urgent(),
                "relation": urgency.relation,
                "urgency": urgency.urgency,
            }),
            if urgency.is_urgent() {
                "Description reports an urgent event involving a first-degree relative"
                    .to_string()
            } else {
                "No first-degree relative emergency detected".to_string()
            },
        );

        let priority = priority_rank(employee, tenure.tenure_years);
        audit.record(
            "position_priority",
            "Position Priority",
            json!({ "position": employee.position.label(), "tenure_years": tenure.tenure_years }),
            serde_json::to_value(priority).unwrap_or_default(),
            format!(
                "Position level {} with {} years of tenure",
                priority.position_level, priority.tenure_years
            ),
        );

        RuleEvaluation {
            facts: RuleFacts {
                interval: *interval,
                calendar_days,
                working_days,
                tenure_years: tenure.tenure_years,
                has_minimum_service: tenure.has_minimum_service,
                entitlement_days,
                exceeds_remaining_balance,
                restricted_overlap,
                summer_quota_exceeded,
                bridges_holiday: bridged.is_some(),
                bridged_holiday: bridged.map(|h| h.name.clone()),
                first_degree_urgent: urgency.is_urgent(),
                priority,
            },
            audit_steps: audit.into_steps(),
        }
    }
}

/// Numbers audit steps in the order they are recorded.
#[derive(Default)]
struct StepRecorder {
    steps: Vec<AuditStep>,
}

impl StepRecorder {
    fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        self.steps.push(AuditStep {
            step_number: self.steps.len() as u32 + 1,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    fn into_steps(self) -> Vec<AuditStep> {
        self.steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::Position;
    use crate::rules::parse_date_range;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn rule_set() -> PolicyRuleSet {
        let loader = ConfigLoader::load("./config/leave_policy").unwrap();
        PolicyRuleSet::from_config(loader.config())
    }

    fn evaluation_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 15).unwrap()
    }

    fn employee_hired_days_ago(days: i64) -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Ayşe Yılmaz".to_string(),
            position: Position::Uzman,
            position_level: 2,
            hire_date: evaluation_date() - Duration::days(days),
            remaining_days: 14,
        }
    }

    fn evaluate(range: &str, description: &str, employee: &Employee) -> RuleEvaluation {
        let interval = parse_date_range(range).unwrap();
        rule_set().evaluate(&interval, description, employee, evaluation_date())
    }

    #[test]
    fn test_ten_years_of_service_grants_twenty_days() {
        let employee = employee_hired_days_ago(3650);
        let facts = evaluate("04.11.2024-06.11.2024", "", &employee).facts;
        assert_eq!(facts.tenure_years, Decimal::from(10));
        assert_eq!(facts.entitlement_days, 20);
        assert!(facts.has_minimum_service);
    }

    #[test]
    fn test_ninety_days_of_service_is_ineligible() {
        let employee = employee_hired_days_ago(90);
        for range in ["01.06.2024-10.06.2024", "04.11.2024-06.11.2024"] {
            let facts = evaluate(range, "", &employee).facts;
            assert!(!facts.has_minimum_service, "range {}", range);
            assert_eq!(facts.entitlement_days, 0);
        }
    }

    #[test]
    fn test_june_request_exceeds_summer_quota() {
        let facts = evaluate("01.06.2024-10.06.2024", "", &employee_hired_days_ago(3650)).facts;
        assert_eq!(facts.calendar_days, 10);
        assert_eq!(facts.working_days, 8);
        assert!(facts.summer_quota_exceeded);
    }

    #[test]
    fn test_april_23_bridge_detected() {
        let facts = evaluate("22.04.2024-24.04.2024", "", &employee_hired_days_ago(3650)).facts;
        assert!(facts.bridges_holiday);
        assert_eq!(
            facts.bridged_holiday.as_deref(),
            Some("Ulusal Egemenlik ve Çocuk Bayramı")
        );
    }

    #[test]
    fn test_year_end_request_reports_first_window() {
        let facts = evaluate("24.12.2024-27.12.2024", "", &employee_hired_days_ago(3650)).facts;
        assert!(facts.restricted_overlap.flag);
        assert_eq!(
            facts.restricted_overlap.reason_label.as_deref(),
            Some("Yıl sonu kapanış dönemi")
        );
    }

    #[test]
    fn test_family_emergency_detected() {
        let facts = evaluate(
            "04.11.2024-06.11.2024",
            "Babam kaza geçirdi, hastanede yanında olmam gerekiyor",
            &employee_hired_days_ago(3650),
        )
        .facts;
        assert!(facts.first_degree_urgent);
    }

    #[test]
    fn test_upper_case_turkish_emergency_detected() {
        let employee = employee_hired_days_ago(3650);
        for description in ["EŞİM DOĞUM YAPACAK", "KIZIM AMELİYAT OLACAK"] {
            let facts = evaluate("04.11.2024-06.11.2024", description, &employee).facts;
            assert!(facts.first_degree_urgent, "{description}");
        }
    }

    #[test]
    fn test_grandparent_emergency_is_not_first_degree() {
        let employee = employee_hired_days_ago(3650);
        for description in ["Babaannem ameliyat olacak", "Anneannem vefat etti"] {
            let facts = evaluate("04.11.2024-06.11.2024", description, &employee).facts;
            assert!(!facts.first_degree_urgent, "{description}");
        }
    }

    #[test]
    fn test_remaining_balance_exceeded() {
        let mut employee = employee_hired_days_ago(3650);
        employee.remaining_days = 2;
        let facts = evaluate("04.11.2024-06.11.2024", "", &employee).facts;
        assert_eq!(facts.working_days, 3);
        assert!(facts.exceeds_remaining_balance);
    }

    #[test]
    fn test_quiet_request_has_all_flags_false() {
        let facts = evaluate(
            "04.11.2024-06.11.2024",
            "Yıllık izin",
            &employee_hired_days_ago(3650),
        )
        .facts;
        assert!(!facts.restricted_overlap.flag);
        assert!(!facts.summer_quota_exceeded);
        assert!(!facts.bridges_holiday);
        assert!(!facts.first_degree_urgent);
        assert!(!facts.exceeds_remaining_balance);
    }

    #[test]
    fn test_priority_reflects_level_and_tenure() {
        let facts = evaluate("04.11.2024-06.11.2024", "", &employee_hired_days_ago(1825)).facts;
        assert_eq!(facts.priority.position_level, 2);
        assert_eq!(facts.priority.tenure_years, Decimal::from(5));
    }

    #[test]
    fn test_audit_records_every_rule_in_order() {
        let evaluation = evaluate("22.04.2024-24.04.2024", "", &employee_hired_days_ago(400));
        let ids: Vec<&str> = evaluation
            .audit_steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "working_days",
                "tenure",
                "entitlement",
                "remaining_balance",
                "restricted_period",
                "summer_quota",
                "bridge_holiday",
                "first_degree_urgency",
                "position_priority",
            ]
        );
        let numbers: Vec<u32> = evaluation.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, (1..=9).collect::<Vec<u32>>());
    }
}
