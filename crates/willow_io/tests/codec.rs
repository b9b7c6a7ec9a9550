use pretty_assertions::assert_eq;
use tracing_test::traced_test;
use willow_io::error::{Error, Result};
use willow_io::{ByteOrder, Cursor, Writer};

#[derive(Debug, Clone, PartialEq)]
struct Record {
    name: String,
    value: i32,
    ratio: f32,
}

fn read_record(cursor: &mut Cursor) -> Result<Record> {
    Ok(Record {
        name: cursor.read_string()?,
        value: cursor.read_i32()?,
        ratio: cursor.read_f32()?,
    })
}

fn write_records(records: &[Record], order: ByteOrder) -> Vec<u8> {
    let mut writer = Writer::new(order);
    writer.write_bytes(b"HEAD");
    writer.write_counted(records, |writer, record| {
        writer.write_string(&record.name);
        writer.write_i32(record.value);
        writer.write_f32(record.ratio);
    });
    writer.write_u8(0xFF);
    writer.finish()
}

fn records() -> Vec<Record> {
    vec![
        Record {
            name: "gd_Skills2_Roland.Scattershot".to_owned(),
            value: 5,
            ratio: 0.25,
        },
        Record {
            name: "Łódź".to_owned(),
            value: -1,
            ratio: 1.5,
        },
        Record {
            name: String::new(),
            value: i32::MAX,
            ratio: 0.0,
        },
    ]
}

#[traced_test]
#[test]
fn counted_records_in_both_orders() -> Result<()> {
    for order in [ByteOrder::Little, ByteOrder::Big] {
        let data = write_records(&records(), order);

        let mut cursor = Cursor::with_order(&data, order);
        assert_eq!(cursor.read_bytes(4)?, b"HEAD");
        assert_eq!(cursor.read_counted(read_record)?, records());
        assert_eq!(cursor.read_u8()?, 0xFF);
        assert_eq!(cursor.remaining(), 0);
    }

    Ok(())
}

#[test]
fn wrong_order_is_detected_by_count() {
    let data = write_records(&records(), ByteOrder::Big);

    // a count of 3 read little endian is 0x03000000, far more than the data can hold
    let mut cursor = Cursor::with_order(&data, ByteOrder::Little);
    cursor.skip(4).unwrap();
    let result = cursor.read_counted(read_record);
    assert!(matches!(result, Err(Error::OutOfRange { .. })));
}

#[test]
fn truncated_group_fails() {
    let data = write_records(&records(), ByteOrder::Little);

    for end in [6, 12, data.len() - 2] {
        let mut cursor = Cursor::new(&data[..end]);
        cursor.skip(4).unwrap();
        let result = cursor.read_counted(read_record);
        assert!(matches!(result, Err(Error::OutOfRange { .. })), "cut at {end}");
    }
}
