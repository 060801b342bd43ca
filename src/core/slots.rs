/// Hour-granularity slot labels offered by the form, e.g. `"9:00 AM"`.
///
/// Stored reservation keys embed these labels verbatim, so the format must stay
/// exactly `"<hour12>:00 <AM|PM>"`; any change breaks comparisons with keys
/// written earlier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlots {
    start_hour: u32,
    end_hour: u32,
}

impl TimeSlots {
    /// Slots for each whole hour in `[start_hour, end_hour)`.
    pub fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn start_hour(&self) -> u32 {
        self.start_hour
    }

    pub fn end_hour(&self) -> u32 {
        self.end_hour
    }

    pub fn labels(&self) -> Vec<String> {
        (self.start_hour..self.end_hour).map(format_label).collect()
    }

    pub fn contains(&self, label: &str) -> bool {
        (self.start_hour..self.end_hour).any(|hour| format_label(hour) == label)
    }

    pub fn len(&self) -> usize {
        self.end_hour.saturating_sub(self.start_hour) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn format_label(hour: u32) -> String {
    let period = if hour % 24 < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:00 {}", hour12, period)
}
