use std::cell::RefCell;

use chrono::{DateTime, TimeZone, Utc};

use tafgroup::{
    decode, ChangeGroupDecoder, ChangeGroupDecoderBuilder, ChangeGroupErr, DateContext,
    DateResolver, GroupState, InvalidDateErr, PatternTable, UtcCalendar, Variant,
};

const EMPTY_BODY: &str = "\n\n     There is no unparsed data for this\n";

#[test]
fn becoming_full_group() {
    let decoder = ChangeGroupDecoder::default();
    let out = decoder.becoming(
        "1918/2018 21015G25KT P6SM -SHRA BKN030CB OVC100 A2992",
        "06",
        "2025",
    );

    assert_eq!(
        concat!(
            "BECOMING from 2025-06-19 18:00:00 UTC to 2025-06-20 18:00:00 UTC",
            "\n     Wind dir : SSW (210 degrees)",
            "\n     Wind speed : 17 mph, 15 knots",
            "\n     Wind gusts : 29 mph, 25 knots",
            "\n     Visibility : Greater than 6 miles, 9.66 kilometers",
            "\n     Pressure   : 29.92 in Hg, 1013 in hPa",
            "\n\n     Total sky conditions: 2",
            "\n     Value: Broken clouds at 3000 feet (Cumulonimbus)",
            "\n     Value: Overcast at 10000 feet",
            "\n\n     Total weather conditions: 1",
            "\n     Value: Light showers rain",
            "\n\n     There is no unparsed data for this\n",
        ),
        out
    );
}

#[test]
fn empty_token() {
    let decoder = ChangeGroupDecoder::default();

    assert_eq!(
        format!("BECOMING from unknown to unknown{}", EMPTY_BODY),
        decoder.becoming("", "06", "2025")
    );
    assert_eq!(
        format!("TEMPORARY from unknown to unknown{}", EMPTY_BODY),
        decoder.tempo("", "06", "2025")
    );
    assert_eq!(
        format!("30% PROBABILITY from unknown to unknown{}", EMPTY_BODY),
        decoder.prob("PROB30", "", "06", "2025").unwrap()
    );
}

#[test]
fn probability_headers() {
    let decoder = ChangeGroupDecoder::default();

    let out = decoder
        .prob("PROB30", "1918/2018 TSRA", "06", "2025")
        .unwrap();
    assert!(out.starts_with("30% PROBABILITY from"));
    assert!(out.contains("Value: Thunderstorm rain"));

    let out = decoder.prob("PROB40", "BKN030", "06", "2025").unwrap();
    assert!(out.starts_with("40% PROBABILITY from unknown to unknown"));

    assert_eq!(
        Err(ChangeGroupErr::MalformedProbability("PROB".to_owned())),
        decoder.prob("PROB", "BKN030", "06", "2025")
    );
}

#[test]
fn from_group() {
    let decoder = ChangeGroupDecoder::default();

    let out = decoder.from_group("191800", "21010KT P6SM SKC", "06", "2025");
    assert!(out.starts_with("FROM 2025-06-19 18:00:00 UTC\n     Wind dir : SSW (210 degrees)"));
    assert!(out.contains("Value: Sky clear"));

    // bad time is logged; the header shows it as unknown
    let out = decoder.from_group("1918", "SKC", "06", "2025");
    assert!(out.starts_with("FROM unknown\n"));

    let out = decoder.from_group("311800", "SKC", "06", "2025");
    assert!(out.starts_with("FROM unknown\n"));
}

#[test]
fn decode_variant_by_keyword() {
    let decoder = ChangeGroupDecoder::default();
    let line = "TEMPO 1918/2018 4SM BR";
    let (keyword, token) = line.split_once(' ').unwrap();
    let variant = Variant::parse(keyword).expect("known keyword");

    let out = decoder
        .decode_variant(&variant, token, "06", "2025")
        .unwrap();
    assert!(out.starts_with("TEMPORARY from 2025-06-19 18:00:00 UTC"));
    assert!(out.contains("\n     Visibility : 4 miles, 6.44 kilometers"));
    assert!(out.contains("\n     Value: Mist"));
}

#[test]
fn unparsed_kept() {
    let decoder = ChangeGroupDecoder::default();
    let out = decoder.tempo("1918/2018 WS020/18040KT BKN030 QQQ", "06", "2025");

    assert!(out.ends_with(
        "\n\n     Unparsed Data is as follows\n     WS020/18040KT\n     QQQ\n"
    ));
    assert!(out.contains("Total sky conditions: 1"));
}

#[test]
fn sky_sorted_by_label() {
    let decoder = ChangeGroupDecoder::default();
    let out = decoder.becoming("FEW020 OVC100 BKN050", "06", "2025");
    let values: Vec<&str> = out
        .lines()
        .filter_map(|ln| ln.trim().strip_prefix("Value: "))
        .collect();
    assert_eq!(
        vec![
            "Broken clouds at 5000 feet",
            "Few clouds at 2000 feet",
            "Overcast at 10000 feet"
        ],
        values
    );

    // sequence numbers keep report order
    let state = decoder.decode_state(&Variant::Becoming, "FEW020 OVC100 BKN050", "06", "2025");
    let seqs: Vec<usize> = state.sky_conditions().iter().map(|(seq, _)| *seq).collect();
    assert_eq!(vec![1, 2, 3], seqs);
}

#[test]
fn idempotent() {
    let decoder = ChangeGroupDecoder::default();
    let token = "1918/2018 VRB03KT 1 1/2SM BR OVC005";
    assert_eq!(
        decoder.tempo(token, "06", "2025"),
        decoder.tempo(token, "06", "2025")
    );
}

#[test]
fn continuation_with_custom_table() {
    let mut table = PatternTable::new();
    table
        .with_handler(
            r"(?P<bvaltime>\d{4})/(?P<evaltime>\d{4})",
            "valtmper",
            true,
        )
        .unwrap();

    let ctx = DateContext::new(&UtcCalendar, "06", "2025");
    let mut state = GroupState::new();
    decode("1200/1400 1500/1700", &table, &ctx, &mut state);
    assert_eq!(
        Some(Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap()),
        state.valid_from()
    );
    assert_eq!(
        Some(Utc.with_ymd_and_hms(2025, 6, 17, 0, 0, 0).unwrap()),
        state.valid_to()
    );

    // table with nothing that matches
    let decoder = ChangeGroupDecoderBuilder::new()
        .with_pattern_table(table)
        .build();
    assert_eq!(
        format!("TEMPORARY from unknown to unknown{}", EMPTY_BODY),
        decoder.tempo("NOMATCH", "06", "2025")
    );
}

// Remembers the day and hour of every date it resolves
#[derive(Default)]
struct RecordingCalendar {
    seen: RefCell<Vec<String>>,
}

impl DateResolver for RecordingCalendar {
    fn resolve(
        &self,
        day: &str,
        hour: &str,
        minute: &str,
        month: &str,
        year: &str,
    ) -> Result<DateTime<Utc>, InvalidDateErr> {
        self.seen.borrow_mut().push(format!("{}{}", day, hour));
        UtcCalendar.resolve(day, hour, minute, month, year)
    }
}

#[test]
fn continuation_before_unparsed() {
    let mut table = PatternTable::new();
    table
        .with_handler(
            r"(?P<bvaltime>\d{4})/(?P<evaltime>\d{4})",
            "valtmper",
            true,
        )
        .unwrap()
        .with_handler(r"(?P<unparsed>\S+)", "unparsed", false)
        .unwrap();

    let calendar = RecordingCalendar::default();
    let ctx = DateContext::new(&calendar, "06", "2025");
    let mut state = GroupState::new();
    decode("1200/1400 XYZ 1500/1700", &table, &ctx, &mut state);

    // both windows, in report order, and nothing else
    assert_eq!(
        vec!["1200", "1400", "1500", "1700"],
        *calendar.seen.borrow()
    );
    assert_eq!(&["XYZ".to_owned()], state.unparsed_fragments());
    assert_eq!(
        Some(Utc.with_ymd_and_hms(2025, 6, 17, 0, 0, 0).unwrap()),
        state.valid_to()
    );
}

#[test]
fn metar_body() {
    let decoder = ChangeGroupDecoder::default();
    let state = decoder.decode_state(
        &Variant::Becoming,
        "28012KT 10SM FEW250 M05/M18 A3012 RMK AO2",
        "01",
        "2025",
    );

    let temp = state.temperature().expect("temperature");
    assert_eq!(Some(-5), temp.celsius());
    assert_eq!(Some(-18), temp.dew_point_celsius());
    assert_eq!(&["RMK".to_owned(), "AO2".to_owned()], state.unparsed_fragments());
}
