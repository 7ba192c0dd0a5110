//! Pushes a fresh question to every registered chat on a fixed daily
//! schedule, from a background task next to the dispatcher.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use teloxide::prelude::*;

use crate::bot::{send_question, AppState};

/// Broadcast times, local wall clock, in ascending order.
const BROADCAST_TIMES: [(u32, u32); 4] = [(9, 0), (12, 0), (15, 0), (18, 0)];

/// Mexico City wall clock. The city dropped DST in 2022, so a fixed offset
/// is exact.
const UTC_OFFSET_SECS: i32 = -6 * 3600;

/// Pause between consecutive sends of one broadcast round, to stay under
/// the outbound rate limit.
const SEND_PAUSE: Duration = Duration::from_secs(1);

pub fn spawn(bot: Bot, state: Arc<AppState>) {
    tokio::spawn(async move {
        loop {
            let pause = until_next_broadcast(Utc::now());
            log::info!("next broadcast in {}s", pause.as_secs());
            tokio::time::sleep(pause).await;
            broadcast(&bot, &state).await;
        }
    });
}

/// One broadcast round: every registered chat gets one question,
/// sequentially. A failed send is logged and skipped; the rest of the list
/// still gets delivered.
pub async fn broadcast(bot: &Bot, state: &AppState) {
    let chats = match state.registry.chat_ids().await {
        Ok(chats) => chats,
        Err(e) => {
            log::error!("could not list registered chats: {e}");
            return;
        }
    };

    log::info!("broadcasting a question to {} chats", chats.len());
    for chat in chats {
        if let Err(e) = send_question(bot, state, chat).await {
            log::error!("broadcast to chat {chat} failed: {e}");
        }
        tokio::time::sleep(SEND_PAUSE).await;
    }
}

/// Time until the next entry of [`BROADCAST_TIMES`]: the first slot later
/// than `now` today, or the earliest slot tomorrow.
fn until_next_broadcast(now: DateTime<Utc>) -> Duration {
    let tz = FixedOffset::east_opt(UTC_OFFSET_SECS).expect("static offset is in range");
    let local = now.with_timezone(&tz).naive_local();
    let today = local.date();

    let next = BROADCAST_TIMES
        .iter()
        .filter_map(|&(hour, minute)| today.and_hms_opt(hour, minute, 0))
        .find(|candidate| *candidate > local)
        .or_else(|| {
            let (hour, minute) = BROADCAST_TIMES[0];
            today.succ_opt()?.and_hms_opt(hour, minute, 0)
        })
        .expect("a broadcast slot always exists");

    (next - local).to_std().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap()
    }

    #[test]
    fn next_slot_later_the_same_day() {
        // 14:00 UTC is 08:00 local; the 09:00 slot is an hour away.
        assert_eq!(until_next_broadcast(at(14, 0)), Duration::from_secs(3600));
        // 15:30 UTC is 09:30 local; next slot is 12:00 local.
        assert_eq!(
            until_next_broadcast(at(15, 30)),
            Duration::from_secs(2 * 3600 + 30 * 60)
        );
    }

    #[test]
    fn after_the_last_slot_wraps_to_tomorrow_morning() {
        // 01:00 UTC is 19:00 local the previous evening; the next slot is
        // 09:00 local the following day, fourteen hours later.
        assert_eq!(
            until_next_broadcast(at(1, 0)),
            Duration::from_secs(14 * 3600)
        );
    }

    #[test]
    fn the_wait_is_always_positive_and_at_most_a_day() {
        for hour in 0..24 {
            for minute in [0, 1, 29, 30, 59] {
                let wait = until_next_broadcast(at(hour, minute));
                assert!(wait > Duration::ZERO, "{hour:02}:{minute:02}");
                assert!(wait <= Duration::from_secs(24 * 3600), "{hour:02}:{minute:02}");
            }
        }
    }

    #[test]
    fn exactly_on_a_slot_schedules_the_following_one() {
        // 15:00 UTC is 09:00 local on the dot; the 09:00 slot is not
        // re-fired, the next is 12:00 local.
        assert_eq!(
            until_next_broadcast(at(15, 0)),
            Duration::from_secs(3 * 3600)
        );
    }
}
