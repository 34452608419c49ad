use crate::{Error, Result};

/// Fills a fixed-width las string field.
pub(crate) trait FromLasStr {
    /// Modifies `self` to match the provided str, nul filling the rest.
    fn from_las_str(&mut self, s: &str) -> Result<()>;
}

impl<T: AsMut<[u8]>> FromLasStr for T {
    fn from_las_str(&mut self, s: &str) -> Result<()> {
        let bytes = self.as_mut();
        if !s.is_ascii() {
            return Err(Error::NotAscii(s.to_string()));
        }
        if s.len() > bytes.len() {
            return Err(Error::StringTooLong {
                string: s.to_string(),
                len: bytes.len(),
            });
        }
        for (a, b) in bytes.iter_mut().zip(s.bytes().chain(std::iter::repeat(0))) {
            *a = b;
        }
        Ok(())
    }
}
