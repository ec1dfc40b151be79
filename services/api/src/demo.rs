use crate::infra::{parse_date, parse_employment_type, InMemoryApplicationRepository};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::Args;
use loan_desk::error::AppError;
use loan_desk::workflows::lending::{
    evaluate_application, Applicant, ApplicationRecord, ApplicationResult,
    ApplicationServiceError, ApplicationSubmission, DisabledNotifier, EmploymentType, Gender,
    IntakeError, LoanApplicationService, MaritalStatus,
};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Applicant date of birth (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date_of_birth: NaiveDate,
    /// Employment type: salaried, self-employed, freelancer, unemployed, or retired
    #[arg(long, value_parser = parse_employment_type)]
    pub(crate) employment: EmploymentType,
    /// Gross annual income
    #[arg(long)]
    pub(crate) annual_income: f64,
    #[arg(long, default_value = "Walk-in")]
    pub(crate) first_name: String,
    #[arg(long, default_value = "Applicant")]
    pub(crate) last_name: String,
    /// Evaluation date (defaults to today, UTC)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Submission date for the sample applicants (defaults to today, UTC)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the partner CSV export instead of the tables
    #[arg(long)]
    pub(crate) csv: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let (result, today) = evaluate_quote(args)?;
    print!("{}", render_result(&result, today));
    Ok(())
}

fn evaluate_quote(args: QuoteArgs) -> Result<(ApplicationResult, NaiveDate), AppError> {
    let today = args.today.unwrap_or_else(|| Utc::now().date_naive());
    if args.date_of_birth > today {
        let rejection = IntakeError::DateOfBirthInFuture(args.date_of_birth);
        return Err(ApplicationServiceError::from(rejection).into());
    }

    let applicant = Applicant {
        first_name: args.first_name,
        last_name: args.last_name,
        date_of_birth: args.date_of_birth,
        gender: Gender::PreferNotToSay,
        marital_status: MaritalStatus::Single,
        phone_number: String::new(),
        email: String::new(),
        employment_type: args.employment,
        annual_income: args.annual_income,
        requested_loan_type: None,
        expected_loan_amount: None,
        preferred_tenure: None,
    };

    Ok((evaluate_application(&applicant, today), today))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let submitted_at = match args.today {
        Some(day) => day
            .and_hms_opt(9, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive))
            .unwrap_or_else(Utc::now),
        None => Utc::now(),
    };

    let service = LoanApplicationService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        Arc::new(DisabledNotifier),
    );

    for submission in sample_submissions() {
        let receipt = service.submit_at(submission, submitted_at)?;
        if !args.csv {
            println!("{} {}", receipt.application_id, receipt.applicant_name);
        }
    }

    if args.csv {
        print!("{}", service.export_csv()?);
        return Ok(());
    }

    println!();
    for record in service.list()? {
        print!("{}", render_record(&record));
    }
    Ok(())
}

fn render_result(result: &ApplicationResult, today: NaiveDate) -> String {
    let mut out = String::new();
    let details = &result.user_details;
    out.push_str(&format!(
        "{} (age {} on {today}, {})\n",
        details.full_name,
        details.age,
        details.employment_type.label()
    ));

    match result.ineligibility_reason {
        Some(reason) => out.push_str(&format!("  NOT ELIGIBLE: {reason}\n")),
        None => {
            let products: Vec<&str> = result
                .eligibility
                .eligible_loan_types
                .iter()
                .map(|loan_type| loan_type.label())
                .collect();
            out.push_str(&format!("  ELIGIBLE: {}\n", products.join(", ")));
        }
    }

    for quote in &result.quotes {
        out.push_str(&format!(
            "  {:<10} amount {:>12.2}  {:>2}y @ {:>4.1}%  monthly {:>10.2}  total {:>12.2}\n",
            quote.loan_type.label(),
            quote.eligible_amount,
            quote.tenure_years,
            quote.interest_rate,
            quote.monthly_payment,
            quote.total_payment
        ));
    }
    out
}

fn render_record(record: &ApplicationRecord) -> String {
    let collateral = record.collateral_view();
    let mut out = format!(
        "{} [{}] ",
        record.application_id,
        collateral.eligibility_status.label()
    );
    out.push_str(&render_result(&record.result, record.submitted_at.date_naive()));
    out.push('\n');
    out
}

fn sample_submissions() -> Vec<ApplicationSubmission> {
    let base = ApplicationSubmission {
        first_name: "Priya".to_string(),
        last_name: "Raman".to_string(),
        date_of_birth: "1988-03-14".to_string(),
        gender: Gender::Female,
        marital_status: MaritalStatus::Married,
        phone_number: "+1 555 0142".to_string(),
        email: "priya.raman@example.com".to_string(),
        employment_type: EmploymentType::Salaried,
        annual_income: 120_000.0,
        requested_loan_type: None,
        expected_loan_amount: None,
        preferred_tenure: None,
    };

    vec![
        base.clone(),
        ApplicationSubmission {
            first_name: "Marco".to_string(),
            last_name: "Silva".to_string(),
            date_of_birth: "2004-09-02".to_string(),
            gender: Gender::Male,
            marital_status: MaritalStatus::Single,
            email: "marco.silva@example.com".to_string(),
            employment_type: EmploymentType::Freelancer,
            annual_income: 38_000.0,
            ..base.clone()
        },
        ApplicationSubmission {
            first_name: "Helen".to_string(),
            last_name: "Okafor".to_string(),
            date_of_birth: "1958-11-20".to_string(),
            gender: Gender::Female,
            marital_status: MaritalStatus::Widowed,
            email: "helen.okafor@example.com".to_string(),
            employment_type: EmploymentType::Retired,
            annual_income: 42_000.0,
            ..base.clone()
        },
        ApplicationSubmission {
            first_name: "Dev".to_string(),
            last_name: "Patel".to_string(),
            date_of_birth: "1995-06-30".to_string(),
            gender: Gender::PreferNotToSay,
            marital_status: MaritalStatus::Single,
            email: "dev.patel@example.com".to_string(),
            employment_type: EmploymentType::Unemployed,
            annual_income: 0.0,
            ..base
        },
    ]
}
