//! Write las points.
//!
//! A [Writer] moves through a fixed lifecycle, and each step can only happen once and in order:
//!
//! 1. [Writer::process_options] fixes the configuration.
//! 2. [Writer::prepare] resolves the extra dimensions and the header against the point table.
//! 3. [Writer::ready] writes a provisional header and the vlrs, and opens the compressor.
//! 4. [Writer::write] encodes a batch of points, as many times as needed.
//! 5. [Writer::done] closes the compressor, writes the evlrs, and rewrites the header.
//!
//! ```
//! use std::io::Cursor;
//! use las_writer::{Options, PointBuffer, State, Writer};
//!
//! let mut buffer = PointBuffer::xyz();
//! buffer.push_xyz(1., 2., 3.).unwrap();
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()));
//! writer.process_options(Options::default()).unwrap();
//! writer.prepare(&buffer).unwrap();
//! writer.ready(&buffer).unwrap();
//! writer.write(&buffer).unwrap();
//! writer.done().unwrap();
//! assert_eq!(State::Done, writer.state());
//! let bytes = writer.into_inner().unwrap().into_inner();
//! assert_eq!(227 + 34, bytes.len());
//! ```
//!
//! Steps can't be skipped:
//!
//! ```
//! use std::io::Cursor;
//! use las_writer::{PointBuffer, Writer};
//!
//! let mut writer = Writer::new(Cursor::new(Vec::new()));
//! assert!(writer.write(&PointBuffer::xyz()).is_err());
//! ```

mod las;
#[cfg(feature = "laz")]
mod laz;

use crate::{
    Error, Header, Metadata, Options, Result, Summary, Vector, Vlr, compression,
    feature::Evlrs,
    header::{self, Builder},
    options::VlrOption,
    point::{Encoded, Encoder, ExtraBytes},
    raw,
    table::{PointTable, PointView},
    transform::Quantizer,
    vlr::Vlrs,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use log::{debug, warn};
use std::{
    fmt,
    fs::File,
    io::{BufWriter, Seek, SeekFrom, Write},
};

/// The most bytes of point records that are encoded before they're flushed to the stream.
const MAX_BUFFER_SIZE: usize = 1_000_000;

/// Where a writer is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Created, with default options.
    Constructed,
    /// Options are fixed.
    OptionsProcessed,
    /// Extra dimensions and the point record length are fixed.
    Prepared,
    /// The header and vlrs are written and points can be written.
    Ready,
    /// At least one batch of points has been written.
    Writing,
    /// The file is complete.
    Done,
}

trait WritePoint<W>: Send {
    fn write_records(&mut self, records: &[u8]) -> Result<()>;
    //https://users.rust-lang.org/t/is-there-a-way-to-move-a-trait-object/707
    fn into_inner(self: Box<Self>) -> W;
    fn done(&mut self) -> Result<()>;
}

type Open<W> = Box<dyn FnOnce() -> Result<W> + Send>;
type OpenPoints<W> = fn(W, Option<Vlr>) -> Result<Box<dyn WritePoint<W>>>;

enum Output<W> {
    Pending(Open<W>),
    Points(Box<dyn WritePoint<W>>),
    Finished(W),
    Taken,
}

/// Everything that's decided when a writer is prepared.
#[derive(Debug)]
struct Session {
    header: Header,
    encoder: Encoder,
    extra_bytes: ExtraBytes,
    summary: Summary,
    vlrs: Vlrs,
}

/// Writes las data.
///
/// The header is written at the stream position the writer finds when it becomes ready, so a
/// writer can follow other data in the same stream. Every offset in the header is relative to
/// that position.
///
/// A writer doesn't finish its file when dropped: call [Writer::done].
pub struct Writer<W: 'static + Write + Seek + Send> {
    state: State,
    options: Options,
    output: Output<W>,
    open_points: OpenPoints<W>,
    quantizer: Quantizer,
    offsets_decided: bool,
    session: Option<Session>,
    start: u64,
    offset_to_point_data: u64,
    buffer: Vec<u8>,
}

impl<W: 'static + Write + Seek + Send> Writer<W> {
    /// Creates a new writer that will write to this stream.
    ///
    /// Nothing is written until the writer is ready.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_writer::{State, Writer};
    /// let writer = Writer::new(Cursor::new(Vec::new()));
    /// assert_eq!(State::Constructed, writer.state());
    /// ```
    pub fn new(write: W) -> Writer<W> {
        Writer::with_opener(Box::new(move || Ok(write)))
    }

    fn with_opener(open: Open<W>) -> Writer<W> {
        let options = Options::default();
        Writer {
            state: State::Constructed,
            quantizer: Quantizer::new(options.scale, options.offset),
            options,
            output: Output::Pending(open),
            open_points,
            offsets_decided: false,
            session: None,
            start: 0,
            offset_to_point_data: 0,
            buffer: Vec::new(),
        }
    }

    /// Returns this writer's lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the resolved header, once the writer is prepared.
    pub fn header(&self) -> Option<&Header> {
        self.session.as_ref().map(|session| &session.header)
    }

    /// Returns the summary of the points written so far, once the writer is prepared.
    pub fn summary(&self) -> Option<&Summary> {
        self.session.as_ref().map(|session| &session.summary)
    }

    /// Fixes this writer's configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_writer::{Options, Writer};
    ///
    /// let mut writer = Writer::new(Cursor::new(Vec::new()));
    /// let options = Options {
    ///     compression: true,
    ///     ..Default::default()
    /// };
    /// let result = writer.process_options(options);
    /// assert_eq!(cfg!(feature = "laz"), result.is_ok());
    /// ```
    pub fn process_options(&mut self, options: Options) -> Result<()> {
        self.expect(State::Constructed)?;
        if options.compression && !compression::is_available() {
            return Err(Error::CompressionUnsupported);
        }
        for (key, scale) in [
            ("scale_x", options.scale.x),
            ("scale_y", options.scale.y),
            ("scale_z", options.scale.z),
        ] {
            if scale == 0. || !scale.is_finite() {
                return Err(Error::InvalidOption {
                    key: key.to_string(),
                    value: scale.to_string(),
                });
            }
        }
        self.quantizer = Quantizer::new(options.scale, options.offset);
        self.options = options;
        self.state = State::OptionsProcessed;
        Ok(())
    }

    /// Resolves the extra dimensions and the header against this point table.
    ///
    /// After this the point record length doesn't change.
    pub fn prepare(&mut self, table: &dyn PointTable) -> Result<()> {
        self.expect(State::OptionsProcessed)?;
        let layout = table.layout();
        let extra_bytes = ExtraBytes::resolve(&self.options.extra_dims, layout)?;
        let header = Builder::new(&self.options)
            .metadata(table.metadata())
            .into_header(extra_bytes.len())?;
        debug!(
            "writing las {} point format {} with {} byte records",
            header.version,
            header.point_format.to_u8(),
            header.point_data_record_length
        );
        let encoder = Encoder::new(
            header.point_format,
            layout,
            extra_bytes.clone(),
            self.options.discard_high_return_numbers,
        );
        self.session = Some(Session {
            summary: Summary::new(header.point_format.max_return_count()),
            header,
            encoder,
            extra_bytes,
            vlrs: Vlrs::default(),
        });
        self.state = State::Prepared;
        Ok(())
    }

    /// Acquires the stream, writes the provisional header and the vlrs, and opens the compressor.
    ///
    /// The vlrs are, in order: those from the options (explicit or forwarded), the spatial
    /// reference records, the extra bytes descriptor, and the laszip record.
    pub fn ready(&mut self, table: &dyn PointTable) -> Result<()> {
        self.expect(State::Prepared)?;
        let session = session_mut(&mut self.session, self.state)?;
        let mut write = match std::mem::replace(&mut self.output, Output::Taken) {
            Output::Pending(open) => open()?,
            _ => {
                return Err(Error::InvalidState {
                    expected: State::Prepared,
                    actual: self.state,
                });
            }
        };
        self.start = write.stream_position()?;

        let mut vlrs = Vlrs::default();
        for vlr in option_vlrs(&self.options.vlrs, table.metadata())? {
            vlrs.add(vlr);
        }
        let spatial_reference = self
            .options
            .spatial_reference
            .as_ref()
            .filter(|srs| !srs.is_empty())
            .or_else(|| table.spatial_reference());
        if let Some(spatial_reference) = spatial_reference {
            for vlr in spatial_reference.vlrs() {
                vlrs.add(vlr);
            }
        }
        if let Some(vlr) = session.extra_bytes.vlr()? {
            vlrs.add(vlr);
        }
        let laszip_vlr = if session.header.is_compressed {
            let vlr = laszip_vlr(&session.header)?;
            vlrs.add(vlr.clone());
            Some(vlr)
        } else {
            None
        };

        let version = session.header.version;
        let mut offset_to_point_data = u64::from(version.header_size()) + vlrs.vlrs_len() as u64;
        if version.requires_point_data_start_signature() {
            offset_to_point_data += raw::POINT_DATA_START_SIGNATURE.len() as u64;
        }
        let layout = header::Layout {
            number_of_vlrs: vlrs.vlrs().len(),
            offset_to_point_data,
            evlr: None,
        };
        session
            .header
            .to_raw(self.quantizer.transforms(), &session.summary, &layout)?
            .write_to(&mut write)?;
        let reserved = version.vlr_reserved();
        for vlr in vlrs.vlrs() {
            vlr.clone().into_raw(false, reserved)?.write_to(&mut write)?;
        }
        if version.requires_point_data_start_signature() {
            write.write_all(&raw::POINT_DATA_START_SIGNATURE)?;
        }
        self.offset_to_point_data = offset_to_point_data;
        session.vlrs = vlrs;

        self.output = Output::Points((self.open_points)(write, laszip_vlr)?);
        self.state = State::Ready;
        Ok(())
    }

    /// Encodes and writes a batch of points.
    ///
    /// Points that are discarded for their return numbers aren't written or counted.
    ///
    /// Points only count toward the summary once their records reach the stream. If a point
    /// can't be encoded, the records before it in its chunk are dropped with it, and the file
    /// can still be finished with what was written before.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_writer::{Options, PointBuffer, Writer};
    ///
    /// let mut buffer = PointBuffer::xyz();
    /// buffer.push_xyz(1., 2., 3.).unwrap();
    /// let mut writer = Writer::new(Cursor::new(Vec::new()));
    /// writer.process_options(Options::default()).unwrap();
    /// writer.prepare(&buffer).unwrap();
    /// writer.ready(&buffer).unwrap();
    /// writer.write(&buffer).unwrap();
    /// writer.write(&buffer).unwrap();
    /// assert_eq!(2, writer.summary().unwrap().number_of_points());
    /// ```
    pub fn write(&mut self, view: &dyn PointView) -> Result<()> {
        if !matches!(self.state, State::Ready | State::Writing) {
            return Err(Error::InvalidState {
                expected: State::Ready,
                actual: self.state,
            });
        }
        let session = session_mut(&mut self.session, self.state)?;
        let Output::Points(points) = &mut self.output else {
            return Err(Error::InvalidState {
                expected: State::Ready,
                actual: self.state,
            });
        };
        self.state = State::Writing;
        if view.is_empty() {
            return Ok(());
        }

        if !self.offsets_decided {
            let mut min = Vector::splat(f64::MAX);
            let mut max = Vector::splat(f64::MIN);
            for index in 0..view.len() {
                let xyz = session.encoder.xyz(view, index);
                min = Vector {
                    x: min.x.min(xyz.x),
                    y: min.y.min(xyz.y),
                    z: min.z.min(xyz.z),
                };
                max = Vector {
                    x: max.x.max(xyz.x),
                    y: max.y.max(xyz.y),
                    z: max.z.max(xyz.z),
                };
            }
            self.quantizer.settle(min, max);
            self.quantizer.freeze();
            self.offsets_decided = true;
        }

        let record_len = session.encoder.record_len();
        let records_per_flush = (MAX_BUFFER_SIZE / record_len).max(1);
        self.buffer.clear();
        self.buffer.reserve(MAX_BUFFER_SIZE.min(record_len * view.len()));
        let mut encoded: Vec<Encoded> = Vec::with_capacity(records_per_flush.min(view.len()));
        let mut start = 0;
        while start < view.len() {
            let end = view.len().min(start + records_per_flush);
            self.buffer.clear();
            encoded.clear();
            for index in start..end {
                if let Some(point) =
                    session
                        .encoder
                        .encode(view, index, &self.quantizer, &mut self.buffer)?
                {
                    encoded.push(point);
                }
            }
            points.write_records(&self.buffer)?;
            for point in &encoded {
                session
                    .summary
                    .add_point(point.xyz.x, point.xyz.y, point.xyz.z, point.return_number);
            }
            start = end;
        }
        Ok(())
    }

    /// Finishes the file.
    ///
    /// The compressor is closed before anything else is written. Then come the evlrs, and then
    /// the header is rewritten with the final counts, bounds and offsets. The stream is left at
    /// the start of the point data.
    pub fn done(&mut self) -> Result<()> {
        if !matches!(self.state, State::Ready | State::Writing) {
            return Err(Error::InvalidState {
                expected: State::Writing,
                actual: self.state,
            });
        }
        let session = session_mut(&mut self.session, self.state)?;
        let mut points = match std::mem::replace(&mut self.output, Output::Taken) {
            Output::Points(points) => points,
            output => {
                self.output = output;
                return Err(Error::InvalidState {
                    expected: State::Writing,
                    actual: self.state,
                });
            }
        };
        points.done()?;
        let mut write = points.into_inner();
        debug!("Wrote {} points", session.summary.number_of_points());
        session.encoder.warnings().report();

        let version = session.header.version;
        let evlrs = session.vlrs.evlrs();
        let evlr = if evlrs.is_empty() {
            None
        } else {
            if !version.supports::<Evlrs>() {
                warn!(
                    "writing {} extended vlrs to a las {} file, which can't record them in its header",
                    evlrs.len(),
                    version
                );
            }
            let start_of_first_evlr = write.stream_position()? - self.start;
            for evlr in evlrs {
                evlr.clone()
                    .into_raw(true, version.vlr_reserved())?
                    .write_to(&mut write)?;
            }
            Some(raw::header::Evlr {
                start_of_first_evlr,
                number_of_evlrs: evlrs.len() as u32,
            })
        };

        let layout = header::Layout {
            number_of_vlrs: session.vlrs.vlrs().len(),
            offset_to_point_data: self.offset_to_point_data,
            evlr,
        };
        let raw_header = session
            .header
            .to_raw(self.quantizer.transforms(), &session.summary, &layout)?;
        let _ = write.seek(SeekFrom::Start(self.start))?;
        raw_header.write_to(&mut write)?;
        let _ = write.seek(SeekFrom::Start(self.start + self.offset_to_point_data))?;
        write.flush()?;
        self.output = Output::Finished(write);
        self.state = State::Done;
        Ok(())
    }

    /// Runs the whole lifecycle: options, prepare, ready, one batch of points, done.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use las_writer::{Options, PointBuffer, Writer};
    ///
    /// let buffer = PointBuffer::xyz();
    /// let mut writer = Writer::new(Cursor::new(Vec::new()));
    /// writer.write_all_from(&Options::default(), &buffer, &buffer).unwrap();
    /// assert_eq!(227, writer.into_inner().unwrap().into_inner().len());
    /// ```
    pub fn write_all_from(
        &mut self,
        options: &Options,
        table: &dyn PointTable,
        view: &dyn PointView,
    ) -> Result<()> {
        self.process_options(options.clone())?;
        self.prepare(table)?;
        self.ready(table)?;
        self.write(view)?;
        self.done()
    }

    /// Returns the stream of a finished writer.
    pub fn into_inner(self) -> Result<W> {
        match self.output {
            Output::Finished(write) => Ok(write),
            _ => Err(Error::InvalidState {
                expected: State::Done,
                actual: self.state,
            }),
        }
    }

    fn expect(&self, state: State) -> Result<()> {
        if self.state == state {
            Ok(())
        } else {
            Err(Error::InvalidState {
                expected: state,
                actual: self.state,
            })
        }
    }
}

impl Writer<BufWriter<File>> {
    /// Creates a writer for the file named in the options, with the options processed.
    ///
    /// The file is created, and truncated, when the writer becomes ready.
    ///
    /// # Examples
    ///
    /// ```
    /// use las_writer::{Options, Writer};
    /// assert!(Writer::from_options(Options::default()).is_err());
    /// let options = Options {
    ///     filename: Some("/dev/null".into()),
    ///     ..Default::default()
    /// };
    /// let writer = Writer::from_options(options).unwrap();
    /// ```
    pub fn from_options(options: Options) -> Result<Writer<BufWriter<File>>> {
        let path = options.filename.clone().ok_or(Error::MissingFilename)?;
        let mut writer = Writer::with_opener(Box::new(move || {
            debug!("creating {}", path.display());
            Ok(BufWriter::new(File::create(&path)?))
        }));
        writer.process_options(options)?;
        Ok(writer)
    }
}

impl<W: 'static + Write + Seek + Send> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer")
            .field("state", &self.state)
            .field("options", &self.options)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn session_mut(session: &mut Option<Session>, state: State) -> Result<&mut Session> {
    session.as_mut().ok_or(Error::InvalidState {
        expected: State::Prepared,
        actual: state,
    })
}

fn open_points<W: 'static + Write + Seek + Send>(
    write: W,
    laszip_vlr: Option<Vlr>,
) -> Result<Box<dyn WritePoint<W>>> {
    match laszip_vlr {
        #[cfg(feature = "laz")]
        Some(vlr) => Ok(Box::new(laz::PointWriter::new(write, &vlr)?)),
        #[cfg(not(feature = "laz"))]
        Some(_) => Err(Error::CompressionUnsupported),
        None => Ok(Box::new(las::PointWriter::new(write))),
    }
}

#[cfg(feature = "laz")]
fn laszip_vlr(header: &Header) -> Result<Vlr> {
    compression::laszip_vlr(header.point_format, header.extra_bytes_len())
}

#[cfg(not(feature = "laz"))]
fn laszip_vlr(_: &Header) -> Result<Vlr> {
    Err(Error::CompressionUnsupported)
}

/// Builds the vlrs asked for in the options.
///
/// A forwarded vlr that isn't in the metadata is skipped.
fn option_vlrs(options: &[VlrOption], metadata: Option<&Metadata>) -> Result<Vec<Vlr>> {
    let mut vlrs = Vec::with_capacity(options.len());
    for option in options {
        let data = if option.forward {
            match metadata.and_then(|metadata| metadata.find_vlr(option.record_id, &option.user_id))
            {
                Some(data) => data,
                None => {
                    debug!(
                        "no vlr with record id {} and user id {} to forward",
                        option.record_id, option.user_id
                    );
                    continue;
                }
            }
        } else {
            option.value.as_str()
        };
        let data = STANDARD
            .decode(data.trim())
            .map_err(|source| Error::Base64 {
                user_id: option.user_id.clone(),
                record_id: option.record_id,
                source,
            })?;
        vlrs.push(Vlr::new(
            &option.user_id,
            option.record_id,
            &option.description,
            data,
        ));
    }
    Ok(vlrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeaderValue, PointBuffer, vlr::MAX_DATA_SIZE};
    use std::{
        io::{self, Cursor},
        sync::{Arc, Mutex},
    };

    #[derive(Clone, Debug, PartialEq)]
    enum Event {
        Write(usize),
        Seek,
        Compress,
        Close,
    }

    #[derive(Clone, Default)]
    struct Events(Arc<Mutex<Vec<Event>>>);

    impl Events {
        fn push(&self, event: Event) {
            self.0.lock().unwrap().push(event);
        }

        fn take(&self) -> Vec<Event> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    struct Sink {
        cursor: Cursor<Vec<u8>>,
        events: Events,
    }

    impl Write for Sink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.events.push(Event::Write(buf.len()));
            self.cursor.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Seek for Sink {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            if !matches!(pos, SeekFrom::Current(0)) {
                self.events.push(Event::Seek);
            }
            self.cursor.seek(pos)
        }
    }

    struct RecordingCodec {
        write: Sink,
    }

    impl WritePoint<Sink> for RecordingCodec {
        fn write_records(&mut self, records: &[u8]) -> Result<()> {
            self.write.events.push(Event::Compress);
            self.write.cursor.write_all(records)?;
            Ok(())
        }

        fn into_inner(self: Box<Self>) -> Sink {
            self.write
        }

        fn done(&mut self) -> Result<()> {
            self.write.events.push(Event::Close);
            Ok(())
        }
    }

    fn recording_codec(write: Sink, _: Option<Vlr>) -> Result<Box<dyn WritePoint<Sink>>> {
        Ok(Box::new(RecordingCodec { write }))
    }

    #[test]
    fn codec_closes_before_evlrs() {
        let events = Events::default();
        let mut writer = Writer::new(Sink {
            cursor: Cursor::new(Vec::new()),
            events: events.clone(),
        });
        writer.open_points = recording_codec;
        let data = vec![0u8; MAX_DATA_SIZE + 1];
        let options = Options {
            minor_version: HeaderValue::Value(4),
            vlrs: vec![VlrOption {
                record_id: 1,
                user_id: "big".to_string(),
                value: STANDARD.encode(&data),
                ..Default::default()
            }],
            ..Default::default()
        };
        let mut buffer = PointBuffer::xyz();
        buffer.push_xyz(1., 2., 3.).unwrap();
        writer.write_all_from(&options, &buffer, &buffer).unwrap();

        let events = events.take();
        let close = events.iter().position(|e| *e == Event::Close).unwrap();
        assert!(events[..close].contains(&Event::Compress));
        assert!(!events[close..].contains(&Event::Compress));
        let trailer: usize = events[close + 1..]
            .iter()
            .take_while(|e| **e != Event::Seek)
            .map(|e| match e {
                Event::Write(n) => *n,
                _ => 0,
            })
            .sum();
        assert_eq!(60 + data.len(), trailer);
    }

    #[test]
    fn lifecycle_order() {
        let buffer = PointBuffer::xyz();
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        assert!(writer.prepare(&buffer).is_err());
        assert!(writer.ready(&buffer).is_err());
        assert!(writer.done().is_err());
        writer.process_options(Options::default()).unwrap();
        assert!(writer.process_options(Options::default()).is_err());
        assert!(writer.ready(&buffer).is_err());
        writer.prepare(&buffer).unwrap();
        assert!(writer.write(&buffer).is_err());
        writer.ready(&buffer).unwrap();
        assert_eq!(State::Ready, writer.state());
        writer.done().unwrap();
        assert!(writer.write(&buffer).is_err());
        assert!(writer.done().is_err());
        assert!(matches!(
            writer.prepare(&buffer),
            Err(Error::InvalidState {
                expected: State::OptionsProcessed,
                actual: State::Done
            })
        ));
    }

    #[test]
    fn into_inner_before_done() {
        let writer = Writer::new(Cursor::new(Vec::new()));
        assert!(writer.into_inner().is_err());
    }

    #[test]
    fn zero_scale() {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        let mut options = Options::default();
        options.scale.y = 0.;
        assert!(writer.process_options(options).is_err());
    }

    #[test]
    fn forwarded_vlr() {
        let mut metadata = Metadata::default();
        metadata.add_vlr("someone", 7, "from the source", "AQID");
        let options = [
            "someone,7,FORWARD,copied".parse::<VlrOption>().unwrap(),
            "nobody,8,FORWARD".parse().unwrap(),
            "someone,9,BAU=".parse().unwrap(),
        ];
        let vlrs = option_vlrs(&options, Some(&metadata)).unwrap();
        assert_eq!(2, vlrs.len());
        assert_eq!(vec![1, 2, 3], vlrs[0].data);
        assert_eq!("copied", vlrs[0].description);
        assert_eq!(vec![4, 5], vlrs[1].data);
    }

    #[test]
    fn bad_base64() {
        let options = ["someone,7,not base64!".parse::<VlrOption>().unwrap()];
        assert!(matches!(
            option_vlrs(&options, None),
            Err(Error::Base64 { record_id: 7, .. })
        ));
    }
}
