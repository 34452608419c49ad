//! End-to-end tests that write whole files and check their bytes.

use byteorder::{ByteOrder, LittleEndian};
use las_writer::{
    Error, HeaderValue, Metadata, Offset, Options, PointBuffer, SpatialReference, State, Vector,
    Writer,
    table::{DataType, Layout, PointTable, PointView, dimension},
};
use std::io::{Cursor, Seek, SeekFrom, Write};

fn write(options: &Options, buffer: &PointBuffer) -> Vec<u8> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_all_from(options, buffer, buffer).unwrap();
    writer.into_inner().unwrap().into_inner()
}

fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    LittleEndian::read_u16(&bytes[offset..])
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    LittleEndian::read_u32(&bytes[offset..])
}

fn u64_at(bytes: &[u8], offset: usize) -> u64 {
    LittleEndian::read_u64(&bytes[offset..])
}

fn i32_at(bytes: &[u8], offset: usize) -> i32 {
    LittleEndian::read_i32(&bytes[offset..])
}

fn f64_at(bytes: &[u8], offset: usize) -> f64 {
    LittleEndian::read_f64(&bytes[offset..])
}

fn returns_buffer(returns: &[(u8, u8)]) -> PointBuffer {
    let mut layout = Layout::xyz();
    let _ = layout.add(dimension::RETURN_NUMBER, DataType::Unsigned8);
    let _ = layout.add(dimension::NUMBER_OF_RETURNS, DataType::Unsigned8);
    let mut buffer = PointBuffer::new(layout);
    for (i, &(return_number, number_of_returns)) in returns.iter().enumerate() {
        buffer
            .push(&[
                i as f64,
                2. * i as f64,
                -(i as f64),
                f64::from(return_number),
                f64::from(number_of_returns),
            ])
            .unwrap();
    }
    buffer
}

#[test]
fn zero_points() {
    let bytes = write(&Options::default(), &PointBuffer::xyz());
    assert_eq!(227, bytes.len());
    assert_eq!(b"LASF", &bytes[0..4]);
    assert_eq!([1, 2], bytes[24..26]);
    assert_eq!(227, u16_at(&bytes, 94));
    assert_eq!(227, u32_at(&bytes, 96));
    assert_eq!(0, u32_at(&bytes, 100));
    assert_eq!(3, bytes[104]);
    assert_eq!(34, u16_at(&bytes, 105));
    assert_eq!(0, u32_at(&bytes, 107));
    for offset in (179..227).step_by(8) {
        assert_eq!(0., f64_at(&bytes, offset));
    }
}

#[test]
fn one_point() {
    let mut buffer = PointBuffer::xyz();
    buffer.push_xyz(1., 2., 3.).unwrap();
    let bytes = write(&Options::default(), &buffer);
    assert_eq!(227 + 34, bytes.len());
    assert_eq!(1, u32_at(&bytes, 107));
    assert_eq!(1, u32_at(&bytes, 111));
    assert_eq!(0.01, f64_at(&bytes, 131));
    assert_eq!(1., f64_at(&bytes, 179));
    assert_eq!(1., f64_at(&bytes, 187));
    assert_eq!(3., f64_at(&bytes, 219));
    assert_eq!(100, i32_at(&bytes, 227));
    assert_eq!(200, i32_at(&bytes, 231));
    assert_eq!(300, i32_at(&bytes, 235));
}

#[test]
fn point_offset_is_first_record() {
    let mut buffer = PointBuffer::xyz();
    buffer.push_xyz(-1., 0.5, 12.34).unwrap();
    buffer.set_spatial_reference(SpatialReference::from_wkt("GEOGCS[\"WGS 84\"]"));
    let bytes = write(&Options::default(), &buffer);
    assert_eq!(2, u32_at(&bytes, 100));
    let offset = u32_at(&bytes, 96) as usize;
    assert_eq!(bytes.len() - 34, offset);
    assert_eq!(-100, i32_at(&bytes, offset));
    assert_eq!(50, i32_at(&bytes, offset + 4));
    assert_eq!(1234, i32_at(&bytes, offset + 8));
}

#[test]
fn options_spatial_reference_overrides_table() {
    let mut buffer = PointBuffer::xyz();
    buffer.set_spatial_reference(SpatialReference::from_wkt("GEOGCS[\"table\"]"));
    let options = Options {
        spatial_reference: Some(SpatialReference::from_wkt("GEOGCS[\"options\"]")),
        ..Default::default()
    };
    let bytes = write(&options, &buffer);
    let length = u16_at(&bytes, 227 + 20) as usize;
    assert_eq!(
        b"GEOGCS[\"options\"]\0",
        &bytes[227 + 54..227 + 54 + length]
    );
}

#[test]
fn count_excludes_discarded_points() {
    let buffer = returns_buffer(&[(1, 1), (6, 7), (2, 7), (1, 2), (7, 7)]);
    let options = Options {
        format: HeaderValue::Value(0),
        discard_high_return_numbers: true,
        ..Default::default()
    };
    let bytes = write(&options, &buffer);
    assert_eq!(3, u32_at(&bytes, 107));
    assert_eq!(2, u32_at(&bytes, 111));
    assert_eq!(1, u32_at(&bytes, 115));
    assert_eq!(227 + 3 * 20, bytes.len());
    // the clamped point keeps its return number and gets a count of five
    assert_eq!(2 | 5 << 3, bytes[227 + 20 + 14]);
    // the last point was discarded, so it isn't in the bounds
    assert_eq!(3., f64_at(&bytes, 179));
}

#[test]
fn high_returns_are_kept_without_discard() {
    let buffer = returns_buffer(&[(6, 7), (1, 1)]);
    let options = Options {
        format: HeaderValue::Value(0),
        ..Default::default()
    };
    let bytes = write(&options, &buffer);
    assert_eq!(2, u32_at(&bytes, 107));
    assert_eq!(1, u32_at(&bytes, 111));
    assert_eq!(0, u32_at(&bytes, 127));
}

#[test]
fn counts_accumulate_across_batches() {
    let mut buffer = PointBuffer::xyz();
    buffer.push_xyz(1., 1., 1.).unwrap();
    buffer.push_xyz(2., 2., 2.).unwrap();
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.process_options(Options::default()).unwrap();
    writer.prepare(&buffer).unwrap();
    writer.ready(&buffer).unwrap();
    writer.write(&buffer).unwrap();
    writer.write(&PointBuffer::xyz()).unwrap();
    writer.write(&buffer).unwrap();
    writer.done().unwrap();
    let bytes = writer.into_inner().unwrap().into_inner();
    assert_eq!(4, u32_at(&bytes, 107));
    assert_eq!(227 + 4 * 34, bytes.len());
}

#[test]
fn version_1_0() {
    let options = Options {
        format: HeaderValue::Value(1),
        minor_version: HeaderValue::Value(0),
        vlrs: vec!["someone,1,AQID,three bytes".parse().unwrap()],
        ..Default::default()
    };
    let mut buffer = PointBuffer::xyz();
    buffer.push_xyz(0., 0., 0.).unwrap();
    let bytes = write(&options, &buffer);
    assert_eq!([1, 0], bytes[24..26]);
    assert_eq!(0xAABB, u16_at(&bytes, 227));
    assert_eq!(3, u16_at(&bytes, 227 + 20));
    let signature = 227 + 54 + 3;
    assert_eq!([0xDD, 0xCC], bytes[signature..signature + 2]);
    assert_eq!(signature as u32 + 2, u32_at(&bytes, 96));
    assert_eq!(signature + 2 + 28, bytes.len());
}

#[test]
fn version_1_4() {
    let mut buffer = PointBuffer::xyz();
    buffer.push_xyz(1., 2., 3.).unwrap();
    let options = Options {
        minor_version: HeaderValue::Value(4),
        ..Default::default()
    };
    let bytes = write(&options, &buffer);
    assert_eq!(375, u16_at(&bytes, 94));
    assert_eq!(375, u32_at(&bytes, 96));
    assert_eq!(0, u64_at(&bytes, 227));
    assert_eq!(0, u64_at(&bytes, 235));
    assert_eq!(0, u32_at(&bytes, 243));
    assert_eq!(1, u64_at(&bytes, 247));
    assert_eq!(1, u64_at(&bytes, 255));
    assert_eq!(1, u32_at(&bytes, 107));
}

#[test]
fn evlr_trailer() {
    let data = vec![7u8; 70_000];
    let mut metadata = Metadata::default();
    metadata.add_vlr("big", 5, "lots of data", &base64_encode(&data));
    let mut buffer = PointBuffer::xyz();
    buffer.push_xyz(1., 2., 3.).unwrap();
    buffer.set_metadata(metadata);
    let options = Options {
        minor_version: HeaderValue::Value(4),
        vlrs: vec!["big,5,FORWARD,forwarded".parse().unwrap()],
        ..Default::default()
    };
    let bytes = write(&options, &buffer);
    assert_eq!(0, u32_at(&bytes, 100));
    let start = u64_at(&bytes, 235) as usize;
    assert_eq!(1, u32_at(&bytes, 243));
    assert_eq!(375 + 34, start);
    assert_eq!(b"big\0", &bytes[start + 2..start + 6]);
    assert_eq!(5, u16_at(&bytes, start + 18));
    assert_eq!(70_000, u64_at(&bytes, start + 20));
    assert_eq!(b"forwarded", &bytes[start + 28..start + 37]);
    assert_eq!(start + 60 + data.len(), bytes.len());
}

#[test]
fn missing_forwarded_vlr_is_skipped() {
    let options = Options {
        vlrs: vec!["someone,1,FORWARD".parse().unwrap()],
        ..Default::default()
    };
    let bytes = write(&options, &PointBuffer::xyz());
    assert_eq!(0, u32_at(&bytes, 100));
    assert_eq!(227, bytes.len());
}

#[test]
fn forwarded_header_values() {
    let mut metadata = Metadata::default();
    metadata.set_header_value("minor_version", "3");
    metadata.set_header_value("system_id", "the scanner");
    metadata.set_header_value("creation_year", "2011");
    let mut buffer = PointBuffer::xyz();
    buffer.set_metadata(metadata);
    let options = Options {
        forward_metadata: true,
        creation_year: HeaderValue::Value(1999),
        ..Default::default()
    };
    let bytes = write(&options, &buffer);
    assert_eq!(3, bytes[25]);
    assert_eq!(235, u16_at(&bytes, 94));
    assert_eq!(b"the scanner\0", &bytes[26..38]);
    assert_eq!(1999, u16_at(&bytes, 92));
}

#[test]
fn extra_dims() {
    let mut layout = Layout::xyz();
    let _ = layout.add_with_description("Amplitude", DataType::Unsigned16, "echo amplitude");
    let _ = layout.add("Deviation", DataType::Double);
    let mut buffer = PointBuffer::new(layout);
    buffer.push(&[0., 0., 0., 513., 41.9]).unwrap();
    let mut options = Options::default();
    options.set("format", "0").unwrap();
    options
        .set("extra_dims", "Amplitude, Deviation=int8")
        .unwrap();
    let bytes = write(&options, &buffer);
    assert_eq!(23, u16_at(&bytes, 105));
    assert_eq!(1, u32_at(&bytes, 100));
    assert_eq!(b"LASF_Spec\0", &bytes[229..239]);
    assert_eq!(4, u16_at(&bytes, 245));
    assert_eq!(2 * 192, u16_at(&bytes, 247));
    let descriptors = 227 + 54;
    assert_eq!(3, bytes[descriptors + 2]);
    assert_eq!(b"Amplitude\0", &bytes[descriptors + 4..descriptors + 14]);
    assert_eq!(b"echo amplitude\0", &bytes[descriptors + 160..descriptors + 175]);
    assert_eq!(2, bytes[descriptors + 192 + 2]);
    let point = u32_at(&bytes, 96) as usize;
    assert_eq!(descriptors + 384, point);
    assert_eq!(&[0x01, 0x02, 41], &bytes[point + 20..point + 23]);
}

#[test]
fn unknown_extra_dim() {
    let options = Options::from_pairs([("extra_dims", "Nope")]).unwrap();
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.process_options(options).unwrap();
    let err = writer.prepare(&PointBuffer::xyz()).unwrap_err();
    assert!(matches!(err, Error::UnknownExtraDimension(ref name) if name == "Nope"));
    assert_eq!(State::OptionsProcessed, writer.state());
}

#[test]
fn unsupported_format_writes_nothing() {
    let options = Options::from_pairs([("format", "6"), ("minor_version", "4")]).unwrap();
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.process_options(options).unwrap();
    assert!(matches!(
        writer.prepare(&PointBuffer::xyz()),
        Err(Error::UnsupportedPointFormat(6))
    ));
}

#[test]
fn coordinate_overflow() {
    let mut buffer = PointBuffer::xyz();
    buffer.push_xyz(1e10, 0., 0.).unwrap();
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.process_options(Options::default()).unwrap();
    writer.prepare(&buffer).unwrap();
    writer.ready(&buffer).unwrap();
    assert!(matches!(
        writer.write(&buffer),
        Err(Error::CoordinateOverflow { .. })
    ));
}

#[test]
fn failed_batch_is_not_counted() {
    let mut good = PointBuffer::xyz();
    good.push_xyz(4., 5., 6.).unwrap();
    let mut bad = PointBuffer::xyz();
    bad.push_xyz(1., 1., 1.).unwrap();
    bad.push_xyz(2., 2., 2.).unwrap();
    bad.push_xyz(1e10, 0., 0.).unwrap();

    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.process_options(Options::default()).unwrap();
    writer.prepare(&good).unwrap();
    writer.ready(&good).unwrap();
    writer.write(&good).unwrap();
    assert!(writer.write(&bad).is_err());
    assert_eq!(1, writer.summary().unwrap().number_of_points());
    writer.done().unwrap();

    let bytes = writer.into_inner().unwrap().into_inner();
    assert_eq!(227 + 34, bytes.len());
    assert_eq!(1, u32_at(&bytes, 107));
    assert_eq!(1, u32_at(&bytes, 111));
    assert_eq!(4., f64_at(&bytes, 179));
    assert_eq!(4., f64_at(&bytes, 187));
    assert_eq!(400, i32_at(&bytes, 227));
}

#[test]
fn auto_offset() {
    let mut buffer = PointBuffer::xyz();
    buffer.push_xyz(500_000., 4_000_000., 10.).unwrap();
    buffer.push_xyz(500_100., 4_000_051., 20.).unwrap();
    let options = Options {
        offset: Vector {
            x: Offset::Auto,
            y: Offset::Auto,
            z: Offset::Value(0.),
        },
        ..Default::default()
    };
    let bytes = write(&options, &buffer);
    assert_eq!(500_050., f64_at(&bytes, 155));
    assert_eq!(4_000_025., f64_at(&bytes, 163));
    assert_eq!(0., f64_at(&bytes, 171));
    assert_eq!(-5_000, i32_at(&bytes, 227));
    assert_eq!(-2_500, i32_at(&bytes, 231));
    assert_eq!(1_000, i32_at(&bytes, 235));
}

#[test]
fn header_after_a_prefix() {
    let mut cursor = Cursor::new(Vec::new());
    cursor.write_all(b"prefix").unwrap();
    let mut buffer = PointBuffer::xyz();
    buffer.push_xyz(1., 2., 3.).unwrap();
    let mut writer = Writer::new(cursor);
    writer
        .write_all_from(&Options::default(), &buffer, &buffer)
        .unwrap();
    let mut cursor = writer.into_inner().unwrap();
    assert_eq!(6 + 227, cursor.stream_position().unwrap());
    let _ = cursor.seek(SeekFrom::Start(0)).unwrap();
    let bytes = cursor.into_inner();
    assert_eq!(b"prefixLASF", &bytes[0..10]);
    assert_eq!(227, u32_at(&bytes, 6 + 96));
    assert_eq!(1, u32_at(&bytes, 6 + 107));
}

#[test]
fn lifecycle_can_not_be_skipped() {
    let buffer = PointBuffer::xyz();
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    assert!(matches!(
        writer.ready(&buffer),
        Err(Error::InvalidState {
            expected: State::Prepared,
            actual: State::Constructed,
        })
    ));
    writer.process_options(Options::default()).unwrap();
    assert!(writer.write(&buffer).is_err());
}

#[test]
fn from_options_creates_the_file() {
    let path = std::env::temp_dir().join(format!("las-writer-{}.las", std::process::id()));
    let options = Options {
        filename: Some(path.clone()),
        ..Default::default()
    };
    let mut buffer = PointBuffer::xyz();
    buffer.push_xyz(1., 2., 3.).unwrap();
    let mut writer = Writer::from_options(options).unwrap();
    assert!(!path.exists());
    writer.prepare(&buffer).unwrap();
    writer.ready(&buffer).unwrap();
    writer.write(&buffer).unwrap();
    writer.done().unwrap();
    drop(writer);
    let bytes = std::fs::read(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(227 + 34, bytes.len());
}

#[test]
fn from_options_needs_a_filename() {
    assert!(matches!(
        Writer::from_options(Options::default()),
        Err(Error::MissingFilename)
    ));
}

#[test]
fn standard_fields_from_a_custom_view() {
    struct Constant(Layout);

    impl PointTable for Constant {
        fn layout(&self) -> &Layout {
            &self.0
        }
    }

    impl PointView for Constant {
        fn len(&self) -> usize {
            3
        }

        fn get_f64(&self, dim: las_writer::table::DimId, _: usize) -> f64 {
            match self.0.dim(dim).name.as_str() {
                dimension::GPS_TIME => 123.5,
                dimension::RED => 65535.,
                _ => 1.,
            }
        }

        fn get_raw(&self, _: las_writer::table::DimId, _: usize) -> &[u8] {
            &[]
        }
    }

    let mut layout = Layout::xyz();
    let _ = layout.add(dimension::GPS_TIME, DataType::Double);
    let _ = layout.add(dimension::RED, DataType::Unsigned16);
    let table = Constant(layout);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer
        .write_all_from(&Options::default(), &table, &table)
        .unwrap();
    let bytes = writer.into_inner().unwrap().into_inner();
    assert_eq!(227 + 3 * 34, bytes.len());
    let point = 227 + 34;
    assert_eq!(123.5, f64_at(&bytes, point + 20));
    assert_eq!(65535, u16_at(&bytes, point + 28));
    assert_eq!(0, u16_at(&bytes, point + 30));
}

#[cfg(not(feature = "laz"))]
#[test]
fn compression_is_unsupported() {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let options = Options::from_pairs([("compression", "true")]).unwrap();
    assert!(matches!(
        writer.process_options(options),
        Err(Error::CompressionUnsupported)
    ));
    assert_eq!(State::Constructed, writer.state());
}

#[cfg(feature = "laz")]
#[test]
fn compressed() {
    let mut buffer = PointBuffer::xyz();
    for i in 0..100 {
        buffer.push_xyz(f64::from(i), 2., 3.).unwrap();
    }
    let options = Options {
        compression: true,
        minor_version: HeaderValue::Value(4),
        vlrs: vec![las_writer::VlrOption {
            user_id: "big".to_string(),
            record_id: 1,
            value: base64_encode(&vec![1; 70_000]),
            ..Default::default()
        }],
        ..Default::default()
    };
    let bytes = write(&options, &buffer);
    assert_eq!(0x83, bytes[104]);
    assert_eq!(1, u32_at(&bytes, 100));
    assert_eq!(b"laszip encoded\0", &bytes[375 + 2..375 + 17]);
    assert_eq!(22204, u16_at(&bytes, 375 + 18));
    assert_eq!(100, u32_at(&bytes, 107));
    assert_eq!(99., f64_at(&bytes, 179));
    let point_data = u32_at(&bytes, 96) as usize;
    let evlr = u64_at(&bytes, 235) as usize;
    assert!(evlr > point_data);
    assert!(evlr < point_data + 100 * 34);
    assert_eq!(evlr + 60 + 70_000, bytes.len());
    assert_eq!(b"big\0", &bytes[evlr + 2..evlr + 6]);

    let vlr_len = usize::from(u16_at(&bytes, 375 + 20));
    let laz_vlr = laz::LazVlr::from_buffer(&bytes[375 + 54..375 + 54 + vlr_len]).unwrap();
    let mut cursor = Cursor::new(bytes.clone());
    let _ = cursor.seek(SeekFrom::Start(point_data as u64)).unwrap();
    let mut decompressor = laz::LasZipDecompressor::new(cursor, laz_vlr).unwrap();
    let mut records = vec![0u8; 100 * 34];
    decompressor.decompress_many(&mut records).unwrap();
    for (i, record) in records.chunks_exact(34).enumerate() {
        assert_eq!(100 * i as i32, i32_at(record, 0));
        assert_eq!(200, i32_at(record, 4));
        assert_eq!(300, i32_at(record, 8));
    }
}

fn base64_encode(data: &[u8]) -> String {
    use base64::{Engine, engine::general_purpose::STANDARD};
    STANDARD.encode(data)
}
