use chrono::NaiveDate;

use super::domain::{Applicant, ApplicationSubmission};

/// Rejections raised before a submission reaches the decision engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("Missing required fields")]
    MissingField(&'static str),
    #[error("dateOfBirth '{0}' must be a YYYY-MM-DD date")]
    InvalidDateOfBirth(String),
    #[error("dateOfBirth {0} is in the future")]
    DateOfBirthInFuture(NaiveDate),
}

/// Turn the posted form into an [`Applicant`], trimming the contact fields.
pub fn applicant_from_submission(
    submission: ApplicationSubmission,
    today: NaiveDate,
) -> Result<Applicant, IntakeError> {
    let ApplicationSubmission {
        first_name,
        last_name,
        date_of_birth,
        gender,
        marital_status,
        phone_number,
        email,
        employment_type,
        annual_income,
        requested_loan_type,
        expected_loan_amount,
        preferred_tenure,
    } = submission;

    let first_name = required("firstName", first_name)?;
    let last_name = required("lastName", last_name)?;
    let date_of_birth = required("dateOfBirth", date_of_birth)?;
    let email = required("email", email)?;
    let phone_number = required("phoneNumber", phone_number)?;

    let date_of_birth = NaiveDate::parse_from_str(&date_of_birth, "%Y-%m-%d")
        .map_err(|_| IntakeError::InvalidDateOfBirth(date_of_birth.clone()))?;
    if date_of_birth > today {
        return Err(IntakeError::DateOfBirthInFuture(date_of_birth));
    }

    Ok(Applicant {
        first_name,
        last_name,
        date_of_birth,
        gender,
        marital_status,
        phone_number,
        email,
        employment_type,
        annual_income,
        requested_loan_type,
        expected_loan_amount,
        preferred_tenure,
    })
}

fn required(field: &'static str, value: String) -> Result<String, IntakeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(IntakeError::MissingField(field))
    } else {
        Ok(trimmed.to_string())
    }
}
