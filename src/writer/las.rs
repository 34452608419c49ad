use super::WritePoint;
use crate::Result;
use std::io::{Seek, Write};

/// Writes point records to the stream as they are.
pub(crate) struct PointWriter<W: Write + Seek> {
    write: W,
}

impl<W: Write + Seek> PointWriter<W> {
    pub(crate) fn new(write: W) -> PointWriter<W> {
        PointWriter { write }
    }
}

impl<W: Write + Seek + Send> WritePoint<W> for PointWriter<W> {
    fn write_records(&mut self, records: &[u8]) -> Result<()> {
        self.write.write_all(records)?;
        Ok(())
    }

    fn into_inner(self: Box<Self>) -> W {
        self.write
    }

    fn done(&mut self) -> Result<()> {
        Ok(())
    }
}
