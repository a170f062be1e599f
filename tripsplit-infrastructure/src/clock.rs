use chrono::{DateTime, Local, Utc};
use tripsplit_application::Clock;
use tripsplit_domain::services::{BoundEdge, parse_date_bound, resolve_timestamp};

/// Wall clock; dates and times typed by users are read in the machine's
/// local time zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn resolve(&self, date: &str, time: &str) -> DateTime<Utc> {
        resolve_timestamp(&Local, date, time, self.now())
    }

    fn date_bound(&self, raw: &str, edge: BoundEdge) -> Option<DateTime<Utc>> {
        parse_date_bound(&Local, raw, edge)
    }
}
