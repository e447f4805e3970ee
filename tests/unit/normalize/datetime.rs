use super::*;

#[test]
fn format_date_strips_first_ordinal_suffix() {
    assert_eq!(format_date(""), "TBD");
    assert_eq!(format_date("3rd"), "3");
    assert_eq!(format_date("June 3rd"), "June 3");
    assert_eq!(format_date("Aug 1st"), "Aug 1");
    assert_eq!(format_date("Sat, Nov 22nd"), "Sat, Nov 22");
    assert_eq!(format_date("Oct 10th & 11th"), "Oct 10 & 11th");
}

#[test]
fn format_date_passes_through_other_text() {
    assert_eq!(format_date("2024-08-20"), "2024-08-20");
    assert_eq!(format_date("Every Friday"), "Every Friday");
    assert_eq!(format_date("5TH"), "5TH");
}

#[test]
fn format_time_canonicalizes_meridiem_times() {
    assert_eq!(format_time(""), "TBD");
    assert_eq!(format_time("7:30pm"), "7:30pm");
    assert_eq!(format_time("7:30 PM"), "7:30pm");
    assert_eq!(format_time("Doors 6:00 p.m."), "Doors 6:00pm");
    assert_eq!(format_time("830pm - late"), "8:30pm - late");
    assert_eq!(format_time("11:15am"), "11:15am");
}

#[test]
fn format_time_leaves_unmatched_text_alone() {
    assert_eq!(format_time("Evening"), "Evening");
    assert_eq!(format_time("19:30"), "19:30");
    assert_eq!(format_time("2024pm"), "2024pm");
    assert_eq!(format_time("7pm"), "7pm");
}

#[test]
fn format_time_requires_meridiem_to_end_a_word() {
    assert_eq!(format_time("7:30 Amphitheater stage"), "7:30 Amphitheater stage");
    assert_eq!(format_time("Show 9:00 PMS Hall"), "Show 9:00 PMS Hall");
    assert_eq!(format_time("830pmx"), "830pmx");
    assert_eq!(format_time("7:30 p.m.2"), "7:30 p.m.2");
    assert_eq!(format_time("9:00 PM, Amphitheater"), "9:00pm, Amphitheater");
    assert_eq!(format_time("6:00 a.m. sharp"), "6:00am sharp");
}

#[test]
fn month_from_structured_dates() {
    assert_eq!(month_from_date("2024-08-20"), Some("August"));
    assert_eq!(month_from_date("12/05/2025"), Some("December"));
    assert_eq!(month_from_date("March 14, 2025"), Some("March"));
    assert_eq!(month_from_date("2025-01-02T19:30:00Z"), Some("January"));
}

#[test]
fn month_from_free_text_falls_back_to_name_scan() {
    assert_eq!(month_from_date("Aug 20th"), Some("August"));
    assert_eq!(month_from_date("August 27th"), Some("August"));
    assert_eq!(month_from_date("sat sept 6"), Some("September"));
    assert_eq!(month_from_date("FRI, OCT 3RD"), Some("October"));
}

#[test]
fn month_from_yearless_numeric_dates() {
    assert_eq!(month_from_date("8/20"), Some("August"));
    assert_eq!(month_from_date("Fri 8/20"), Some("August"));
    assert_eq!(month_from_date("Sat, 12/6"), Some("December"));
    assert_eq!(month_from_date("2/29"), Some("February"));
    assert_eq!(month_from_date("13/20"), None);
    assert_eq!(month_from_date("8/20/"), None);
}

#[test]
fn month_from_unresolvable_text_is_none() {
    assert_eq!(month_from_date("no date here"), None);
    assert_eq!(month_from_date(""), None);
    assert_eq!(month_from_date("   "), None);
    assert_eq!(month_from_date("TBD"), None);
}
