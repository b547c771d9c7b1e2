//! Recording payments from two-line chat messages and `/delete`.

use donorbook_shared::{parse_month_year, ActorId, PaymentEntry};
use donorbook_store::{Pool, Result};
use tracing::info;

use super::donor_not_found;

const DELETE_USAGE: &str = "Использование: /delete ФАМИЛИЯ МЕСЯЦ [ГОД]";

/// Record a parsed payment message on behalf of `actor`.
pub async fn record(pool: &Pool, entry: &PaymentEntry, actor: ActorId) -> Result<String> {
    let PaymentEntry { last_name, period } = entry.clone();

    // `None` when the donor does not exist.
    let outcome = pool
        .run({
            let last_name = last_name.clone();
            move |db| match db.get_donor(&last_name)? {
                Some(donor) => db.record_payment(donor.id, period, actor).map(Some),
                None => Ok(None),
            }
        })
        .await?;

    match outcome {
        None => Ok(donor_not_found(&last_name)),
        Some(true) => {
            info!(donor = %last_name, %period, actor = %actor, "payment recorded");
            Ok(format!("Оплата записана: {last_name}, {period}"))
        }
        Some(false) => Ok(format!("Оплата уже записана: {last_name}, {period}")),
    }
}

/// `/delete <surname> <month> [year]`
pub async fn delete(pool: &Pool, args: Option<&str>, current_year: u32) -> Result<String> {
    let Some((last_name, period_args)) = args.and_then(split_surname) else {
        return Ok(DELETE_USAGE.to_string());
    };

    let period = match parse_month_year(Some(period_args), current_year) {
        Ok(period) => period,
        Err(e) => return Ok(e.to_string()),
    };

    let name = last_name.to_string();
    let outcome = pool
        .run(move |db| match db.get_donor(&name)? {
            Some(donor) => db.delete_payment(donor.id, period).map(Some),
            None => Ok(None),
        })
        .await?;

    match outcome {
        None => Ok(donor_not_found(last_name)),
        Some(true) => {
            info!(donor = %last_name, %period, "payment deleted");
            Ok(format!("Запись удалена: {last_name}, {period}"))
        }
        Some(false) => Ok(format!("Запись не найдена: {last_name}, {period}")),
    }
}

/// First token and the remainder; `None` unless both are present.
fn split_surname(args: &str) -> Option<(&str, &str)> {
    let (head, rest) = args.trim().split_once(char::is_whitespace)?;
    let rest = rest.trim();
    (!rest.is_empty()).then_some((head, rest))
}
