use snafu::{Location, Snafu};

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum EncodeError {
    #[snafu(display("MMSI '{mmsi}' does not fit in nine digits"))]
    Mmsi {
        #[snafu(implicit)]
        location: Location,
        mmsi: u32,
    },
    #[snafu(display("Field '{field}' is outside its encodable range, value: '{value}'"))]
    OutOfRange {
        #[snafu(implicit)]
        location: Location,
        field: &'static str,
        value: f64,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum DecodeError {
    #[snafu(display("Not an AIVDM sentence: '{sentence}'"))]
    Sentence {
        #[snafu(implicit)]
        location: Location,
        sentence: String,
    },
    #[snafu(display("Checksum mismatch, sentence states '{stated:02X}' but computed '{computed:02X}'"))]
    Checksum {
        #[snafu(implicit)]
        location: Location,
        stated: u8,
        computed: u8,
    },
    #[snafu(display("Multi fragment sentences are not supported, fragment count: '{count}'"))]
    Fragmented {
        #[snafu(implicit)]
        location: Location,
        count: String,
    },
    #[snafu(display("Encountered a character outside the six-bit alphabet '{character}'"))]
    Armor {
        #[snafu(implicit)]
        location: Location,
        character: char,
    },
    #[snafu(display("Payload is too short for a position report, bits: '{bits}'"))]
    Truncated {
        #[snafu(implicit)]
        location: Location,
        bits: usize,
    },
    #[snafu(display("Unsupported message type '{message_type}'"))]
    UnsupportedMessageType {
        #[snafu(implicit)]
        location: Location,
        message_type: u8,
    },
}
