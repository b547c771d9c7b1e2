//! `/start`, `/help` and the read-only reports.

use donorbook_shared::months::month_name;
use donorbook_shared::parse_month_year;
use donorbook_store::{Pool, Result};

use super::{donor_not_found, numbered_list};

pub fn start() -> String {
    "Бот для учёта ежемесячных пожертвований.\n\n\
     Используйте /help для списка команд."
        .to_string()
}

pub fn help() -> String {
    "Доступные команды:\n\n\
     /add_donor ФАМИЛИЯ - добавить донора\n\
     /add_many ФАМИЛИЯ1 ФАМИЛИЯ2 ... - добавить нескольких доноров\n\
     /remove_donor ФАМИЛИЯ - удалить донора\n\
     /donors - список всех доноров\n\n\
     /paid МЕСЯЦ [ГОД] - кто оплатил\n\
     /unpaid МЕСЯЦ [ГОД] - кто не оплатил\n\
     /history ФАМИЛИЯ - история оплат донора\n\
     /delete ФАМИЛИЯ МЕСЯЦ [ГОД] - удалить запись об оплате\n\n\
     /add_admin TELEGRAM_ID - выдать доступ к боту\n\n\
     Для записи оплаты отправьте сообщение в формате:\n\
     Фамилия\n\
     Месяц [Год]"
        .to_string()
}

pub async fn paid(pool: &Pool, args: Option<&str>, current_year: u32) -> Result<String> {
    let period = match parse_month_year(args, current_year) {
        Ok(period) => period,
        Err(e) => return Ok(e.to_string()),
    };

    let donors = pool.run(move |db| db.list_paid_donors(period)).await?;
    if donors.is_empty() {
        return Ok(format!("Никто не оплатил за {period}."));
    }

    Ok(numbered_list(format!("Оплатили за {period}:"), &donors))
}

pub async fn unpaid(pool: &Pool, args: Option<&str>, current_year: u32) -> Result<String> {
    let period = match parse_month_year(args, current_year) {
        Ok(period) => period,
        Err(e) => return Ok(e.to_string()),
    };

    let donors = pool.run(move |db| db.list_unpaid_donors(period)).await?;
    if donors.is_empty() {
        return Ok(format!("Все оплатили за {period}!"));
    }

    Ok(numbered_list(format!("Не оплатили за {period}:"), &donors))
}

pub async fn history(pool: &Pool, args: Option<&str>) -> Result<String> {
    let Some(last_name) = args.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok("Использование: /history ФАМИЛИЯ".to_string());
    };

    let name = last_name.to_string();
    let history = pool
        .run(move |db| match db.get_donor(&name)? {
            Some(donor) => db.get_history(donor.id).map(Some),
            None => Ok(None),
        })
        .await?;

    let Some(history) = history else {
        return Ok(donor_not_found(last_name));
    };
    if history.is_empty() {
        return Ok(format!("У донора {last_name} нет записей об оплатах."));
    }

    let mut lines = vec![format!("История оплат {last_name}:")];
    lines.extend(history.iter().map(|payment| {
        format!(
            "• {} {}",
            month_name(payment.period.month),
            payment.period.year
        )
    }));
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use donorbook_shared::{ActorId, Period};

    use super::*;
    use crate::dispatch::tests::test_pool;

    async fn seed(pool: &Pool, payments: &[(&str, u32, u32)]) {
        for &(name, month, year) in payments {
            let name = name.to_string();
            pool.run(move |db| {
                db.add_donor(&name)?;
                let id = db.get_donor(&name)?.unwrap().id;
                db.record_payment(id, Period::new(month, year), ActorId(1))
            })
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_history_order() {
        let (pool, _dir) = test_pool();
        seed(&pool, &[("Smith", 3, 2023), ("Smith", 1, 2024)]).await;

        assert_eq!(
            history(&pool, Some("Smith")).await.unwrap(),
            "История оплат Smith:\n• Январь 2024\n• Март 2023"
        );
    }

    #[tokio::test]
    async fn test_history_empty_vs_missing() {
        let (pool, _dir) = test_pool();
        pool.run(|db| db.add_donor("Jones")).await.unwrap();

        assert_eq!(
            history(&pool, Some("Jones")).await.unwrap(),
            "У донора Jones нет записей об оплатах."
        );
        assert_eq!(
            history(&pool, Some("Nobody")).await.unwrap(),
            "Донор Nobody не найден."
        );
        assert_eq!(
            history(&pool, None).await.unwrap(),
            "Использование: /history ФАМИЛИЯ"
        );
    }

    #[tokio::test]
    async fn test_paid_and_unpaid() {
        let (pool, _dir) = test_pool();
        seed(&pool, &[("Smith", 5, 2024), ("Adams", 5, 2024), ("Jones", 6, 2024)]).await;

        assert_eq!(
            paid(&pool, Some("мая 2024"), 2030).await.unwrap(),
            "Оплатили за Май 2024:\n1. Adams\n2. Smith"
        );
        assert_eq!(
            unpaid(&pool, Some("май"), 2024).await.unwrap(),
            "Не оплатили за Май 2024:\n1. Jones"
        );
        assert_eq!(
            paid(&pool, Some("январь 2024"), 2030).await.unwrap(),
            "Никто не оплатил за Январь 2024."
        );
    }

    #[tokio::test]
    async fn test_everyone_paid() {
        let (pool, _dir) = test_pool();
        seed(&pool, &[("Smith", 7, 2024)]).await;

        assert_eq!(
            unpaid(&pool, Some("июль 2024"), 2030).await.unwrap(),
            "Все оплатили за Июль 2024!"
        );
    }

    #[tokio::test]
    async fn test_period_errors_match_free_text_wording() {
        let (pool, _dir) = test_pool();

        assert_eq!(paid(&pool, None, 2024).await.unwrap(), "Укажите месяц.");
        assert_eq!(
            unpaid(&pool, Some("blah"), 2024).await.unwrap(),
            "Неизвестный месяц: blah"
        );
        assert_eq!(
            paid(&pool, Some("май year"), 2024).await.unwrap(),
            "Неверный формат года: year"
        );
    }

    #[test]
    fn test_help_mentions_every_command() {
        let text = help();
        for command in [
            "/add_donor", "/add_many", "/remove_donor", "/donors", "/paid", "/unpaid",
            "/history", "/delete", "/add_admin",
        ] {
            assert!(text.contains(command), "{command} missing from /help");
        }
    }
}
