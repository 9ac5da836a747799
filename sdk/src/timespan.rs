// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Human readable elapsed time, e.g. `"2 Days 5 Hours 12 Minutes"`.

use chrono::NaiveDateTime;

/// Whether a zero day count is written out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DayDisplay {
    /// `"0 Days 3 Hours 4 Minutes"`
    Always,
    /// `"3 Hours 4 Minutes"`
    WhenNonZero,
}

/// Time elapsed between `since` and `now`. A `since` in the future reads as zero.
pub fn elapsed_text(since: NaiveDateTime, now: NaiveDateTime, days: DayDisplay) -> String {
    let total_minutes = (now - since).num_minutes().max(0);
    let day_count = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;

    if day_count == 0 && days == DayDisplay::WhenNonZero {
        format!("{} Hours {} Minutes", hours, minutes)
    } else {
        format!("{} Days {} Hours {} Minutes", day_count, hours, minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, NaiveDate};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd(2024, 1, 10).and_hms(9, 0, 0)
    }

    #[test]
    fn test_elapsed_with_days() {
        let now = start() + Duration::days(2) + Duration::hours(5) + Duration::minutes(12);
        assert_eq!(
            elapsed_text(start(), now, DayDisplay::WhenNonZero),
            "2 Days 5 Hours 12 Minutes"
        );
        assert_eq!(
            elapsed_text(start(), now, DayDisplay::Always),
            "2 Days 5 Hours 12 Minutes"
        );
    }

    #[test]
    fn test_elapsed_under_a_day() {
        let now = start() + Duration::hours(3) + Duration::minutes(4) + Duration::seconds(59);
        assert_eq!(
            elapsed_text(start(), now, DayDisplay::WhenNonZero),
            "3 Hours 4 Minutes"
        );
        assert_eq!(
            elapsed_text(start(), now, DayDisplay::Always),
            "0 Days 3 Hours 4 Minutes"
        );
    }

    #[test]
    fn test_future_start_reads_as_zero() {
        let now = start() - Duration::minutes(30);
        assert_eq!(
            elapsed_text(start(), now, DayDisplay::WhenNonZero),
            "0 Hours 0 Minutes"
        );
    }
}
