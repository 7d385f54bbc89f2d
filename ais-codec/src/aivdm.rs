use crate::{
    MessageKind, NavigationStatus, PositionReport,
    armor::{BitReader, BitWriter},
    error::{
        DecodeError, EncodeError,
        decode_error::{
            ChecksumSnafu, FragmentedSnafu, SentenceSnafu, TruncatedSnafu,
            UnsupportedMessageTypeSnafu,
        },
        encode_error::{MmsiSnafu, OutOfRangeSnafu},
    },
};
use num_traits::FromPrimitive;

const POSITION_REPORT_BITS: usize = 168;
const MAX_MMSI: u32 = 999_999_999;
const COORDINATE_SCALE: f64 = 600_000.0;
const RATE_OF_TURN_NOT_AVAILABLE: i64 = -128;
const HEADING_NOT_AVAILABLE: u64 = 511;
const TIMESTAMP_NOT_AVAILABLE: u64 = 60;

/// Codec for class A position reports in `!AIVDM` sentences.
///
/// Encoded sentences are always single fragment and sent on channel `A`, fields the
/// simulator has no value for (rate of turn, heading, UTC second) are marked as not
/// available.
#[derive(Debug, Default, Clone, Copy)]
pub struct Aivdm;

impl Aivdm {
    pub fn encode(&self, report: &PositionReport) -> Result<String, EncodeError> {
        let PositionReport {
            kind,
            mmsi,
            latitude,
            longitude,
            speed,
            course,
            status,
        } = report;

        if *mmsi > MAX_MMSI {
            return MmsiSnafu { mmsi: *mmsi }.fail();
        }

        let speed = scale_unsigned("speed", *speed, 10.0, 1023)?;
        let longitude = scale_signed("longitude", *longitude, 28)?;
        let latitude = scale_signed("latitude", *latitude, 27)?;
        let course = if course.is_finite() {
            // 3600 means not available, a full turn wraps to north.
            ((course.rem_euclid(360.0) * 10.0).round() as u64) % 3600
        } else {
            return OutOfRangeSnafu {
                field: "course",
                value: *course,
            }
            .fail();
        };

        let mut bits = BitWriter::with_capacity(POSITION_REPORT_BITS);
        bits.push_unsigned(kind.message_type() as u64, 6);
        // Repeat indicator
        bits.push_unsigned(0, 2);
        bits.push_unsigned(*mmsi as u64, 30);
        bits.push_unsigned(*status as u64, 4);
        bits.push_signed(RATE_OF_TURN_NOT_AVAILABLE, 8);
        bits.push_unsigned(speed, 10);
        // Position accuracy
        bits.push_unsigned(0, 1);
        bits.push_signed(longitude, 28);
        bits.push_signed(latitude, 27);
        bits.push_unsigned(course, 12);
        bits.push_unsigned(HEADING_NOT_AVAILABLE, 9);
        bits.push_unsigned(TIMESTAMP_NOT_AVAILABLE, 6);
        // Maneuver indicator, spare, RAIM flag and radio status
        bits.push_unsigned(0, 2);
        bits.push_unsigned(0, 3);
        bits.push_unsigned(0, 1);
        bits.push_unsigned(0, 19);

        let (payload, fill_bits) = bits.armor();
        let body = format!("AIVDM,1,1,,A,{payload},{fill_bits}");

        Ok(format!("!{body}*{:02X}", checksum(&body)))
    }

    pub fn decode(&self, sentence: &str) -> Result<PositionReport, DecodeError> {
        let trimmed = sentence.trim();

        let Some((body, stated)) = trimmed
            .strip_prefix('!')
            .and_then(|s| s.split_once('*'))
        else {
            return SentenceSnafu { sentence }.fail();
        };

        let Ok(stated) = u8::from_str_radix(stated, 16) else {
            return SentenceSnafu { sentence }.fail();
        };

        let computed = checksum(body);
        if computed != stated {
            return ChecksumSnafu { stated, computed }.fail();
        }

        let fields = body.split(',').collect::<Vec<_>>();
        let [talker, count, _number, _sequence, _channel, payload, fill_bits] = fields[..] else {
            return SentenceSnafu { sentence }.fail();
        };

        if talker.len() != 5 || !(talker.ends_with("VDM") || talker.ends_with("VDO")) {
            return SentenceSnafu { sentence }.fail();
        }
        if count != "1" {
            return FragmentedSnafu { count }.fail();
        }
        let fill_bits = match fill_bits.parse::<usize>() {
            Ok(v) if v <= 5 => v,
            _ => return SentenceSnafu { sentence }.fail(),
        };

        let reader = BitReader::unarmor(payload, fill_bits)?;
        if reader.len() < 6 {
            return TruncatedSnafu { bits: reader.len() }.fail();
        }

        let message_type = reader.unsigned(0, 6) as u8;
        let Some(kind) = MessageKind::from_message_type(message_type) else {
            return UnsupportedMessageTypeSnafu { message_type }.fail();
        };

        if reader.len() < POSITION_REPORT_BITS {
            return TruncatedSnafu { bits: reader.len() }.fail();
        }

        Ok(PositionReport {
            kind,
            mmsi: reader.unsigned(8, 30) as u32,
            status: NavigationStatus::from_u64(reader.unsigned(38, 4))
                .unwrap_or(NavigationStatus::NotDefined),
            speed: reader.unsigned(50, 10) as f64 / 10.0,
            longitude: reader.signed(61, 28) as f64 / COORDINATE_SCALE,
            latitude: reader.signed(89, 27) as f64 / COORDINATE_SCALE,
            course: reader.unsigned(116, 12) as f64 / 10.0,
        })
    }
}

fn scale_unsigned(field: &'static str, value: f64, scale: f64, max: u64) -> Result<u64, EncodeError> {
    let scaled = (value * scale).round();
    if !scaled.is_finite() || scaled < 0.0 || scaled > max as f64 {
        OutOfRangeSnafu { field, value }.fail()
    } else {
        Ok(scaled as u64)
    }
}

fn scale_signed(field: &'static str, value: f64, width: usize) -> Result<i64, EncodeError> {
    let scaled = (value * COORDINATE_SCALE).round();
    let limit = (1i64 << (width - 1)) as f64;
    if !scaled.is_finite() || scaled < -limit || scaled >= limit {
        OutOfRangeSnafu { field, value }.fail()
    } else {
        Ok(scaled as i64)
    }
}

fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}
