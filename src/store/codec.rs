//! On-disk layout of a stored reading
//!
//! Key: `[ts: u64 BE][record type: u8][serial: utf-8]`, where `ts` is the UTC timestamp in
//! microseconds with its sign bit flipped, so keys sort by time even before 1970.
//! Rows of different record types at the same instant get distinct keys.
//!
//! Value: `[offset: i32 BE][has value: u8][value: i64 BE]`

use crate::{Reading, Record, RecordType};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use chrono::{DateTime, FixedOffset};

const SIGN_BIT: u64 = 1 << 63;

pub const TIMESTAMP_LEN: usize = std::mem::size_of::<u64>();

const PREFIX_LEN: usize = TIMESTAMP_LEN + 1;

/// Encodes a timestamp into its sortable key prefix.
#[allow(clippy::cast_sign_loss)]
pub fn encode_timestamp(micros: i64) -> [u8; TIMESTAMP_LEN] {
    ((micros as u64) ^ SIGN_BIT).to_be_bytes()
}

#[allow(clippy::cast_possible_wrap)]
fn decode_timestamp(bytes: [u8; TIMESTAMP_LEN]) -> i64 {
    (u64::from_be_bytes(bytes) ^ SIGN_BIT) as i64
}

pub fn encode_key(record: &Record) -> Vec<u8> {
    let mut key = Vec::with_capacity(PREFIX_LEN + record.serial_number.len());
    key.extend_from_slice(&encode_timestamp(record.reading.timestamp.timestamp_micros()));
    key.push(record.record_type.0);
    key.extend_from_slice(record.serial_number.as_bytes());
    key
}

pub fn encode_value(record: &Record) -> std::io::Result<Vec<u8>> {
    let mut value = Vec::with_capacity(13);

    value.write_i32::<BigEndian>(record.reading.timestamp.offset().local_minus_utc())?;

    match record.reading.value {
        Some(v) => {
            value.write_u8(1)?;
            value.write_i64::<BigEndian>(v)?;
        }
        None => {
            value.write_u8(0)?;
            value.write_i64::<BigEndian>(0)?;
        }
    }

    Ok(value)
}

pub fn decode(key: &[u8], value: &[u8]) -> crate::Result<Record> {
    let ts = key
        .get(..TIMESTAMP_LEN)
        .and_then(|ts| <[u8; TIMESTAMP_LEN]>::try_from(ts).ok())
        .ok_or(crate::Error::Decode)?;
    let record_type = *key.get(TIMESTAMP_LEN).ok_or(crate::Error::Decode)?;
    let serial = key.get(PREFIX_LEN..).ok_or(crate::Error::Decode)?;
    let serial_number = std::str::from_utf8(serial)
        .map_err(|_| crate::Error::Decode)?
        .to_owned();

    let mut reader = value;
    let offset_secs = reader.read_i32::<BigEndian>()?;
    let has_value = reader.read_u8()? == 1;
    let value = reader.read_i64::<BigEndian>()?;

    let offset = FixedOffset::east_opt(offset_secs).ok_or(crate::Error::Decode)?;
    let timestamp = DateTime::from_timestamp_micros(decode_timestamp(ts))
        .ok_or(crate::Error::Decode)?
        .with_timezone(&offset);

    Ok(Record {
        serial_number,
        record_type: RecordType(record_type),
        reading: Reading::new(timestamp, has_value.then_some(value)),
    })
}
