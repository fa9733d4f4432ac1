//! Prompts for leave adjudication.

use chrono::Weekday;

use crate::config::PolicyConfig;
use crate::models::{Employee, LeaveRequest, RuleFacts};

/// System instructions for the reasoning backend.
pub const SYSTEM_PROMPT: &str = r#"You are an HR leave request reviewer.

Evaluate the leave request using only the facts provided. Apply these criteria
in order of precedence:
1. Tenure and seniority: an employee below the minimum service period is not
   yet eligible for annual leave; the annual entitlement follows the tenure tier.
2. Quota limits: a request that exceeds the remaining leave balance or the
   summer quota should be rejected or shortened.
3. Restricted periods: a request overlapping a restricted period conflicts with
   an organizational commitment.
4. Holiday bridging: a request covering the days on both sides of a public
   holiday qualifies for one additional day of leave; mention it.
5. Urgency override: an urgent event involving a first-degree relative may
   override criteria 2 to 4.
6. Position priority: when requests conflict, a higher position level and then
   longer tenure take precedence.

Do not invent facts. Be explicit about which criteria decided the outcome.

Answer in exactly this format:
Status: ApprovalRecommended or RejectionRecommended
- one justification per line, each starting with "- "
Alternative Suggestion: alternative dates or arrangement, or None"#;

/// The two text blocks sent to the reasoning backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPrompt {
    /// System-role instructions.
    pub system: String,
    /// User-role fact listing.
    pub user: String,
}

/// Renders request facts into the fixed prompt structure.
///
/// Every fact is listed on every call, including rules that evaluated to
/// false, so the backend always sees the complete picture.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    rest_day: Weekday,
    minimum_service_days: i64,
    summer_cap: u32,
}

impl PromptComposer {
    /// Creates a composer labelling facts with the given policy thresholds.
    pub fn new(policy: &PolicyConfig) -> Self {
        Self {
            rest_day: policy.rest_day,
            minimum_service_days: policy.tenure.minimum_service_days,
            summer_cap: policy.summer_quota.max_working_days,
        }
    }

    /// Builds the system and user prompts for one request.
    pub fn compose(
        &self,
        request: &LeaveRequest,
        employee: &Employee,
        facts: &RuleFacts,
    ) -> ComposedPrompt {
        let mut user = format!("Leave request {}\n", request.id);

        user.push_str(&format!("Employee: {} ({})\n", employee.name, employee.id));
        user.push_str(&format!(
            "Position: {} (level {})\n",
            employee.position, employee.position_level
        ));
        user.push_str(&format!("Hire date: {}\n", employee.hire_date));
        user.push_str(&format!(
            "Remaining leave days: {}\n",
            employee.remaining_days
        ));
        user.push_str(&format!("Requested dates: {}\n", request.date_range_text.trim()));
        user.push_str(&format!("Calendar days: {}\n", facts.calendar_days));
        user.push_str(&format!(
            "Working days (excluding {}): {}\n",
            weekday_name(self.rest_day),
            facts.working_days
        ));
        user.push_str(&format!("Tenure: {} years\n", facts.tenure_years));
        user.push_str(&format!(
            "Minimum service ({} days): {}\n",
            self.minimum_service_days,
            yes_no(facts.has_minimum_service)
        ));
        user.push_str(&format!(
            "Annual entitlement: {} days\n",
            facts.entitlement_days
        ));
        user.push_str(&format!(
            "Exceeds remaining balance: {}\n",
            yes_no(facts.exceeds_remaining_balance)
        ));
        user.push_str(&match &facts.restricted_overlap.reason_label {
            Some(label) => format!("Restricted period: Yes ({})\n", label),
            None => "Restricted period: No\n".to_string(),
        });
        user.push_str(&format!(
            "Summer quota exceeded (max {} working days): {}\n",
            self.summer_cap,
            yes_no(facts.summer_quota_exceeded)
        ));
        user.push_str(&match (&facts.bridged_holiday, facts.bridges_holiday) {
            (Some(name), true) => format!(
                "Bridging: Yes ({}; one extra day of leave recommended)\n",
                name
            ),
            (None, true) => "Bridging: Yes (one extra day of leave recommended)\n".to_string(),
            (_, false) => "Bridging: No\n".to_string(),
        });
        user.push_str(&format!(
            "First-degree relative urgency: {}\n",
            yes_no(facts.first_degree_urgent)
        ));
        user.push_str(&format!(
            "Position priority: level {}, tenure {} years\n",
            facts.priority.position_level, facts.priority.tenure_years
        ));

        let description = request.description.trim();
        user.push_str(&format!(
            "Description: {}",
            if description.is_empty() {
                "(none)"
            } else {
                description
            }
        ));

        ComposedPrompt {
            system: SYSTEM_PROMPT.to_string(),
            user,
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{DateInterval, Position, PriorityRank, RestrictedOverlap};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn composer() -> PromptComposer {
        let loader = ConfigLoader::load("./config/leave_policy").unwrap();
        PromptComposer::new(loader.config().policy())
    }

    fn employee() -> Employee {
        Employee {
            id: "emp_007".to_string(),
            name: "Elif Şahin".to_string(),
            position: Position::Sef,
            position_level: 2,
            hire_date: NaiveDate::from_ymd_opt(2016, 2, 1).unwrap(),
            remaining_days: 11,
        }
    }

    fn request(description: &str) -> LeaveRequest {
        LeaveRequest::new("req_42", "emp_007", "22.04.2024-24.04.2024", description)
    }

    fn facts() -> RuleFacts {
        RuleFacts {
            interval: DateInterval::new(
                NaiveDate::from_ymd_opt(2024, 4, 22).unwrap(),
                NaiveDate::from_ymd_opt(2024, 4, 24).unwrap(),
            )
            .unwrap(),
            calendar_days: 3,
            working_days: 3,
            tenure_years: Decimal::new(80, 1).normalize(),
            has_minimum_service: true,
            entitlement_days: 20,
            exceeds_remaining_balance: false,
            restricted_overlap: RestrictedOverlap::none(),
            summer_quota_exceeded: false,
            bridges_holiday: true,
            bridged_holiday: Some("Ulusal Egemenlik ve Çocuk Bayramı".to_string()),
            first_degree_urgent: false,
            priority: PriorityRank {
                position_level: 2,
                tenure_years: Decimal::from(8),
            },
        }
    }

    #[test]
    fn test_user_prompt_lists_every_fact_in_order() {
        let prompt = composer().compose(&request("Aile ziyareti"), &employee(), &facts());
        let labels: Vec<&str> = prompt
            .user
            .lines()
            .skip(1)
            .map(|line| line.split(':').next().unwrap())
            .collect();

        assert_eq!(
            labels,
            vec![
                "Employee",
                "Position",
                "Hire date",
                "Remaining leave days",
                "Requested dates",
                "Calendar days",
                "Working days (excluding Sunday)",
                "Tenure",
                "Minimum service (180 days)",
                "Annual entitlement",
                "Exceeds remaining balance",
                "Restricted period",
                "Summer quota exceeded (max 6 working days)",
                "Bridging",
                "First-degree relative urgency",
                "Position priority",
                "Description",
            ]
        );
    }

    #[test]
    fn test_false_outcomes_are_reported_explicitly() {
        let prompt = composer().compose(&request(""), &employee(), &facts());

        assert!(prompt.user.contains("Restricted period: No\n"));
        assert!(prompt.user.contains("Summer quota exceeded (max 6 working days): No\n"));
        assert!(prompt.user.contains("First-degree relative urgency: No\n"));
        assert!(prompt.user.contains("Exceeds remaining balance: No\n"));
        assert!(prompt.user.ends_with("Description: (none)"));
    }

    #[test]
    fn test_positive_outcomes_carry_details() {
        let mut facts = facts();
        facts.restricted_overlap = RestrictedOverlap::matched("Bütçe planlama dönemi");

        let prompt = composer().compose(&request("x"), &employee(), &facts);
        assert!(
            prompt
                .user
                .contains("Restricted period: Yes (Bütçe planlama dönemi)\n")
        );
        assert!(prompt.user.contains(
            "Bridging: Yes (Ulusal Egemenlik ve Çocuk Bayramı; one extra day of leave recommended)\n"
        ));
        assert!(prompt.user.contains("Tenure: 8 years\n"));
        assert!(prompt.user.contains("Position: Şef (level 2)\n"));
    }

    #[test]
    fn test_system_prompt_states_precedence_and_format() {
        let prompt = composer().compose(&request(""), &employee(), &facts());
        let system = &prompt.system;

        let tenure = system.find("Tenure and seniority").unwrap();
        let quota = system.find("Quota limits").unwrap();
        let restricted = system.find("Restricted periods").unwrap();
        let bridging = system.find("Holiday bridging").unwrap();
        let urgency = system.find("Urgency override").unwrap();
        let priority = system.find("Position priority").unwrap();
        assert!(tenure < quota && quota < restricted && restricted < bridging);
        assert!(bridging < urgency && urgency < priority);

        assert!(system.contains("Status:"));
        assert!(system.contains("Alternative Suggestion:"));
    }
}
