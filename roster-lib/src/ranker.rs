//! Birthday proximity: how many days until a birthday next comes around, and the display
//! ordering that follows from it.

use chrono::{Datelike, Days, NaiveDate};
use strum::Display;

use crate::repository::Member;

/// Default upper bound (inclusive) for a birthday to count as [`Proximity::Soon`].
pub const SOON_THRESHOLD_DAYS: u32 = 7;

/// Number of whole days from `today` to the next occurrence of `day`/`month`.
///
/// Returns `0` on the birthday itself. A day past the end of its month rolls over into
/// the next month, so 31 February lands on 3 March (2 March in a leap year). Such a
/// birthday is therefore `0` days away on the rolled-over date, not on a date matching
/// its day and month. The result is always in `0..=366`.
pub fn days_until_next(day: u8, month: u8, today: NaiveDate) -> u32 {
    let this_year = occurrence(today.year(), day, month);
    let next = if this_year >= today {
        this_year
    } else {
        occurrence(today.year().saturating_add(1), day, month)
    };

    u32::try_from((next - today).num_days()).unwrap_or(0)
}

/// Sort members by ascending [`days_until_next`]. The sort is stable: members with the
/// same distance keep their input order.
pub fn rank_by_proximity(mut members: Vec<Member>, today: NaiveDate) -> Vec<Member> {
    members.sort_by_cached_key(|m| days_until_next(m.day(), m.month(), today));
    members
}

/// Presentation class of a birthday based on its distance in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Proximity {
    Today,
    Soon(u32),
    Later(u32),
}

impl Proximity {
    pub fn classify(days: u32, soon_threshold: u32) -> Self {
        match days {
            0 => Self::Today,
            d if d <= soon_threshold => Self::Soon(d),
            d => Self::Later(d),
        }
    }
}

/// Calendar date of the birthday in `year`. Inputs outside their ranges are clamped;
/// stored records are validated before they get here.
fn occurrence(year: i32, day: u8, month: u8) -> NaiveDate {
    let month = u32::from(month.clamp(1, 12));
    let offset = Days::new(u64::from(day.clamp(1, 31) - 1));

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_days(offset))
        .unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod test {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn names(members: &[Member]) -> Vec<&str> {
        members.iter().map(|m| m.name().as_str()).collect()
    }

    fn permutations(items: Vec<Member>) -> Vec<Vec<Member>> {
        if items.len() <= 1 {
            return vec![items];
        }

        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.clone();
            let head = rest.remove(i);
            for mut tail in permutations(rest) {
                tail.insert(0, head.clone());
                out.push(tail);
            }
        }
        out
    }

    #[test]
    fn test_days_until_next() {
        let today = date(2025, 6, 10);

        assert_eq!(days_until_next(10, 6, today), 0);
        assert_eq!(days_until_next(11, 6, today), 1);
        assert_eq!(days_until_next(17, 6, today), 7);
        assert_eq!(days_until_next(9, 6, today), 364);
        assert_eq!(days_until_next(1, 1, today), 205);
    }

    #[test]
    fn test_days_until_next_crosses_leap_day() {
        // 2024 is a leap year
        assert_eq!(days_until_next(28, 2, date(2024, 3, 1)), 364);
        assert_eq!(days_until_next(28, 2, date(2023, 3, 2)), 363);
        assert_eq!(days_until_next(29, 2, date(2023, 3, 2)), 364);
        assert_eq!(days_until_next(29, 2, date(2024, 2, 29)), 0);
    }

    #[test]
    fn test_days_until_next_rolls_over_short_months() {
        // 31 February is 3 March in 2025
        assert_eq!(days_until_next(31, 2, date(2025, 3, 3)), 0);
        assert_eq!(days_until_next(31, 2, date(2025, 3, 1)), 2);
        // 31 April is 1 May
        assert_eq!(days_until_next(31, 4, date(2025, 4, 30)), 1);
    }

    #[test]
    fn test_days_until_next_is_within_range() {
        let references = [
            date(2023, 1, 1),
            date(2023, 12, 31),
            date(2024, 1, 1),
            date(2024, 2, 29),
            date(2024, 3, 1),
            date(2024, 12, 31),
            date(2025, 3, 4),
        ];

        for today in references {
            for month in 1..=12 {
                for day in 1..=31 {
                    let days = days_until_next(day, month, today);
                    assert!(days <= 366, "{day}/{month} from {today} gave {days}");
                }
            }
        }
    }

    #[test]
    fn test_zero_exactly_on_birthday() {
        for year in [2023, 2024] {
            let mut today = date(year, 1, 1);
            while today.year() == year {
                for month in 1..=12u8 {
                    for day in 1..=31u8 {
                        let is_real =
                            NaiveDate::from_ymd_opt(year, u32::from(month), u32::from(day))
                                .is_some();
                        if !is_real {
                            continue;
                        }

                        let same_date =
                            today.day() == u32::from(day) && today.month() == u32::from(month);
                        assert_eq!(days_until_next(day, month, today) == 0, same_date);
                    }
                }
                today = today.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn test_zero_on_rolled_over_date_for_short_months() {
        for (year, day, month) in [
            (2025, 29, 2),
            (2025, 30, 2),
            (2025, 31, 2),
            (2024, 30, 2),
            (2024, 31, 2),
            (2025, 31, 4),
            (2025, 31, 6),
            (2025, 31, 9),
            (2025, 31, 11),
        ] {
            let rolled = date(year, u32::from(month), 1)
                .checked_add_days(Days::new(u64::from(day) - 1))
                .unwrap();
            assert_eq!(rolled.month(), u32::from(month) + 1);

            let mut today = date(year, 1, 1);
            while today.year() == year {
                assert_eq!(
                    days_until_next(day, month, today) == 0,
                    today == rolled,
                    "{day}/{month} on {today}"
                );
                today = today.succ_opt().unwrap();
            }
        }
    }

    #[test]
    fn test_repeated_calls_agree() {
        let today = date(2026, 10, 16);
        let first = days_until_next(3, 11, today);

        for _ in 0..10 {
            assert_eq!(days_until_next(3, 11, today), first);
        }
    }

    #[test]
    fn test_rank_by_proximity() {
        let today = date(2025, 12, 31);
        let members = vec![
            Member::mock("2", "Carla", 5, 1),
            Member::mock("3", "Duarte", 30, 12),
            Member::mock("1", "Bea", 31, 12),
        ];

        assert_eq!(days_until_next(31, 12, today), 0);
        assert_eq!(days_until_next(5, 1, today), 5);

        let ranked = rank_by_proximity(members, today);

        assert_eq!(names(&ranked), ["Bea", "Carla", "Duarte"]);
    }

    #[test]
    fn test_rank_by_proximity_is_stable() {
        let today = date(2025, 6, 1);
        let members = vec![
            Member::mock("1", "Ana", 3, 6),
            Member::mock("2", "Bruno", 3, 6),
            Member::mock("3", "Carla", 2, 6),
            Member::mock("4", "Diogo", 3, 6),
        ];

        for input in permutations(members) {
            let tied_in_input: Vec<String> = input
                .iter()
                .filter(|m| m.day() == 3)
                .map(|m| m.name().clone())
                .collect();

            let ranked = rank_by_proximity(input, today);

            assert_eq!(ranked.first().unwrap().name(), "Carla");
            let tied_in_output: Vec<String> = ranked
                .iter()
                .skip(1)
                .map(|m| m.name().clone())
                .collect();
            assert_eq!(tied_in_output, tied_in_input);
        }
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_by_proximity(Vec::new(), date(2025, 1, 1)).is_empty());
    }

    #[test]
    fn test_classify() {
        assert_eq!(Proximity::classify(0, SOON_THRESHOLD_DAYS), Proximity::Today);
        assert_eq!(Proximity::classify(1, SOON_THRESHOLD_DAYS), Proximity::Soon(1));
        assert_eq!(Proximity::classify(7, SOON_THRESHOLD_DAYS), Proximity::Soon(7));
        assert_eq!(Proximity::classify(8, SOON_THRESHOLD_DAYS), Proximity::Later(8));
        assert_eq!(Proximity::classify(3, 2), Proximity::Later(3));
    }
}
