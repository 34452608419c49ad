use super::WritePoint;
use crate::{Result, Vlr, compression};
use laz::{LasZipCompressor, LazVlr};
use std::io::{Seek, Write};

/// Hands point records to a laszip compressor.
pub(crate) struct PointWriter<W: Write + Seek + Send + 'static> {
    compressor: LasZipCompressor<'static, W>,
}

impl<W: Write + Seek + Send + 'static> PointWriter<W> {
    /// Opens a compressor at the stream's current position.
    ///
    /// The chunk table offset is reserved right away, so a file with no points is still valid.
    pub(crate) fn new(write: W, vlr: &Vlr) -> Result<PointWriter<W>> {
        let open = |err| compression::error("Error opening compressor", err);
        let laz_vlr = LazVlr::from_buffer(&vlr.data).map_err(open)?;
        let mut compressor = LasZipCompressor::new(write, laz_vlr).map_err(open)?;
        compressor
            .reserve_offset_to_chunk_table()
            .map_err(|err| compression::error("Error opening compressor", err))?;
        Ok(PointWriter { compressor })
    }
}

impl<W: Write + Seek + Send + 'static> WritePoint<W> for PointWriter<W> {
    fn write_records(&mut self, records: &[u8]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        self.compressor
            .compress_many(records)
            .map_err(|err| compression::error("Error writing point", err))
    }

    fn into_inner(self: Box<Self>) -> W {
        self.compressor.into_inner()
    }

    fn done(&mut self) -> Result<()> {
        self.compressor
            .done()
            .map_err(|err| compression::error("Error closing compressor", err))
    }
}
