use chrono::{NaiveDate, TimeZone, Timelike, Utc};
use metastamp::{
    evolve, CodecConfig, EjsonMode, FieldValue, QueryValue, StampDecoder, StampEncoder, StampError,
    TimeLike, Zone,
};

fn new_york() -> CodecConfig {
    CodecConfig::in_zone(Zone::named("America/New_York").unwrap())
}

fn paris() -> CodecConfig {
    CodecConfig::in_zone(Zone::named("Europe/Paris").unwrap())
}

#[test]
fn worked_example_new_york_pre_shift() {
    let encoder = StampEncoder::new(new_york());
    let instant = Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap();
    let fragment = encoder
        .mongoize(Some(&TimeLike::Instant(instant)))
        .unwrap()
        .unwrap();

    assert_eq!(fragment.time, instant);
    assert_eq!(
        fragment.normalized,
        Utc.with_ymd_and_hms(2024, 3, 10, 1, 30, 0).unwrap()
    );
    assert_eq!(fragment.cweek, 10);
    assert_eq!(fragment.year, 2024);
    assert_eq!(fragment.month, 3);
    assert_eq!(fragment.day, 10);
    assert_eq!(fragment.wday, 0); // Sunday
    assert_eq!(fragment.hour, 1);
    assert_eq!(fragment.min, 30);
    assert_eq!(fragment.sec, 0);
    assert_eq!(fragment.zone, "America/New_York");
    assert_eq!(fragment.offset, -18000);
}

#[test]
fn wire_document_field_set_is_exact() {
    let encoder = StampEncoder::new(new_york());
    let instant = Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap();
    let doc = encoder
        .mongoize_to_document(Some(&TimeLike::Instant(instant)))
        .unwrap()
        .unwrap();

    let fields = match &doc {
        FieldValue::Document(fields) => fields,
        other => panic!("expected document, got {other:?}"),
    };
    let keys: Vec<&str> = fields.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "time",
            "normalized",
            "cweek",
            "year",
            "month",
            "day",
            "wday",
            "hour",
            "min",
            "sec",
            "zone",
            "offset"
        ]
    );
    assert_eq!(
        doc.get("time"),
        Some(&FieldValue::DateTime(1_710_052_200_000))
    );
    assert_eq!(
        doc.get("normalized"),
        Some(&FieldValue::DateTime(1_710_034_200_000))
    );
    assert_eq!(
        doc.get("zone"),
        Some(&FieldValue::Str("America/New_York".into()))
    );
    assert_eq!(doc.get("offset"), Some(&FieldValue::Int32(-18000)));
}

#[test]
fn offset_is_captured_at_the_instant_not_the_date() {
    // The US shift that day happens at 07:00 UTC; one hour after the
    // worked example the same date encodes with the summer offset.
    let encoder = StampEncoder::new(new_york());
    let instant = Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap();
    let fragment = encoder
        .mongoize(Some(&TimeLike::Instant(instant)))
        .unwrap()
        .unwrap();
    assert_eq!(fragment.hour, 3);
    assert_eq!(fragment.offset, -14400);
}

#[test]
fn normalized_tracks_the_encode_zone_wall_clock() {
    let instant = Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap();
    let ny = StampEncoder::new(new_york())
        .mongoize(Some(&TimeLike::Instant(instant)))
        .unwrap()
        .unwrap();
    let fr = StampEncoder::new(paris())
        .mongoize(Some(&TimeLike::Instant(instant)))
        .unwrap()
        .unwrap();

    // 06:30Z is 01:30 in New York and 07:30 in Paris; the sort key
    // reads those wall clocks as UTC.
    assert_eq!(
        ny.normalized,
        Utc.with_ymd_and_hms(2024, 3, 10, 1, 30, 0).unwrap()
    );
    assert_eq!(
        fr.normalized,
        Utc.with_ymd_and_hms(2024, 3, 10, 7, 30, 0).unwrap()
    );
}

#[test]
fn matching_wall_clocks_collide_on_normalized() {
    // 01:30 local in New York and 01:30 local in Paris are different
    // instants but the same wall clock; both land on the same key.
    let ny_instant = Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap();
    let fr_instant = Utc.with_ymd_and_hms(2024, 3, 10, 0, 30, 0).unwrap();
    let ny = StampEncoder::new(new_york())
        .mongoize(Some(&TimeLike::Instant(ny_instant)))
        .unwrap()
        .unwrap();
    let fr = StampEncoder::new(paris())
        .mongoize(Some(&TimeLike::Instant(fr_instant)))
        .unwrap()
        .unwrap();
    assert_eq!(ny.normalized, fr.normalized);
}

#[test]
fn roundtrip_across_zone_panel() {
    let instant = Utc.with_ymd_and_hms(2024, 7, 15, 18, 45, 12).unwrap();
    let zones = [
        Zone::utc(),
        Zone::named("America/New_York").unwrap(),
        Zone::named("Europe/Paris").unwrap(),
        Zone::named("Asia/Kolkata").unwrap(),
        Zone::named("Pacific/Auckland").unwrap(),
    ];
    for zone in zones {
        let config = CodecConfig::in_zone(zone);
        let doc = StampEncoder::new(config)
            .mongoize_to_document(Some(&TimeLike::Instant(instant)))
            .unwrap()
            .unwrap();
        let stamp = StampDecoder::new(config)
            .demongoize(&doc)
            .unwrap()
            .unwrap();
        assert_eq!(stamp.instant, instant, "instant drift in {zone}");
        assert_eq!(stamp.zone, zone, "zone lost in {zone}");
    }
}

#[test]
fn blank_propagates_as_no_value() {
    let config = new_york();
    assert_eq!(StampEncoder::new(config).mongoize(None), Ok(None));
    assert_eq!(
        StampDecoder::new(config).demongoize(&FieldValue::Null),
        Ok(None)
    );
}

#[test]
fn legacy_bare_datetime_decodes_without_fragment_fields() {
    let config = new_york();
    let instant = Utc.with_ymd_and_hms(2019, 6, 1, 12, 0, 0).unwrap();
    let stamp = StampDecoder::new(config)
        .demongoize(&FieldValue::DateTime(instant.timestamp_millis()))
        .unwrap()
        .unwrap();
    assert_eq!(stamp.instant, instant);
    assert_eq!(stamp.zone, config.default_zone);
    // 12:00Z is 08:00 in New York that day (EDT).
    let local = stamp.local();
    assert_eq!((local.hour(), local.minute()), (8, 0));
    assert_eq!(stamp.in_zone(Zone::utc()).local().hour(), 12);
}

#[test]
fn decode_rejects_non_time_like_values() {
    let decoder = StampDecoder::new(new_york());
    assert_eq!(
        decoder.demongoize(&FieldValue::Str("2024-03-10".into())),
        Err(StampError::NotTimeLike)
    );
    assert_eq!(
        decoder.demongoize(&FieldValue::Document(vec![(
            "year".into(),
            FieldValue::Int32(2024)
        )])),
        Err(StampError::MissingTime)
    );
    assert_eq!(
        decoder.demongoize(&FieldValue::Document(vec![(
            "time".into(),
            FieldValue::Str("noon".into())
        )])),
        Err(StampError::MalformedTime)
    );
}

#[test]
fn encode_rejects_unparseable_text() {
    let encoder = StampEncoder::new(new_york());
    let result = encoder.mongoize(Some(&TimeLike::from("not a time")));
    assert_eq!(
        result,
        Err(StampError::ConversionFailed("not a time".into()))
    );
}

#[test]
fn text_and_date_inputs_coerce_through_the_default_zone() {
    let encoder = StampEncoder::new(new_york());
    let expected = Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap();

    let from_wall_clock = encoder
        .mongoize(Some(&TimeLike::from("2024-03-10 01:30:00")))
        .unwrap()
        .unwrap();
    assert_eq!(from_wall_clock.time, expected);

    let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let from_date = encoder
        .mongoize(Some(&TimeLike::Date(date)))
        .unwrap()
        .unwrap();
    // Midnight in New York is 05:00 UTC.
    assert_eq!(
        from_date.time,
        Utc.with_ymd_and_hms(2024, 3, 10, 5, 0, 0).unwrap()
    );
}

#[test]
fn store_as_utc_flag_never_moves_the_instant() {
    let mut config = new_york();
    config.store_as_utc = false;
    let instant = Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap();
    let doc = StampEncoder::new(config)
        .mongoize_to_document(Some(&TimeLike::Instant(instant)))
        .unwrap()
        .unwrap();
    let stamp = StampDecoder::new(config)
        .demongoize(&doc)
        .unwrap()
        .unwrap();
    assert_eq!(stamp.instant, instant);
}

#[test]
fn evolve_wraps_time_like_operands() {
    let config = new_york();
    let instant = Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap();

    let evolved = evolve(QueryValue::Instant(instant), &config);
    assert_eq!(
        evolved,
        FieldValue::Document(vec![(
            "time".into(),
            FieldValue::DateTime(instant.timestamp_millis())
        )])
    );

    let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let evolved = evolve(QueryValue::Date(date), &config);
    // A bare date means its midnight in the default zone, exactly as
    // the encoder would coerce it.
    assert_eq!(
        evolved,
        FieldValue::Document(vec![(
            "time".into(),
            FieldValue::DateTime(1_710_046_800_000)
        )])
    );
}

#[test]
fn evolve_passes_foreign_operands_through() {
    let config = new_york();
    let regex = FieldValue::Regex("^ev".into(), "i".into());
    assert_eq!(evolve(QueryValue::Value(regex.clone()), &config), regex);
    let raw = FieldValue::Str("unrelated".into());
    assert_eq!(evolve(QueryValue::Value(raw.clone()), &config), raw);
}

#[test]
fn fragment_documents_cross_the_ejson_boundary_losslessly() {
    let encoder = StampEncoder::new(new_york());
    let instant = Utc.with_ymd_and_hms(2024, 3, 10, 6, 30, 0).unwrap();
    let doc = encoder
        .mongoize_to_document(Some(&TimeLike::Instant(instant)))
        .unwrap()
        .unwrap();
    for mode in [EjsonMode::Relaxed, EjsonMode::Canonical] {
        let ejson = metastamp::to_ejson(&doc, mode);
        let back = metastamp::from_ejson(&ejson).unwrap();
        assert_eq!(back, doc, "ejson roundtrip in {mode:?}");
    }
}
