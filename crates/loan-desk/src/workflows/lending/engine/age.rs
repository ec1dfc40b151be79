use chrono::{Datelike, NaiveDate};

/// Whole years completed between `birth` and `reference`.
///
/// The year difference drops by one while the birthday is still ahead in the
/// reference year. A 29 February birthday counts as passed from 1 March.
pub fn age_on(birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
