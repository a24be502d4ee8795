use crate::core::constants::DEFAULT_SEPARATORS;
use crate::util::error::SeekError;

/// Ordered, deduplicated byte strings placed between the two coordinate tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorSet {
    separators: Vec<Vec<u8>>,
}

impl SeparatorSet {
    /// Keeps the first occurrence of each separator, in the given order.
    pub fn new<I, S>(separators: I) -> Result<Self, SeekError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        let mut unique: Vec<Vec<u8>> = Vec::new();
        for sep in separators {
            let sep = sep.into();
            if !unique.contains(&sep) {
                unique.push(sep);
            }
        }
        if unique.is_empty() {
            return Err(SeekError::EmptySeparators);
        }
        Ok(Self { separators: unique })
    }

    pub fn len(&self) -> usize {
        self.separators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.separators.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.separators.iter().map(Vec::as_slice)
    }

    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.separators.get(index).map(Vec::as_slice)
    }
}

impl Default for SeparatorSet {
    fn default() -> Self {
        Self {
            separators: DEFAULT_SEPARATORS
                .iter()
                .map(|s| s.as_bytes().to_vec())
                .collect(),
        }
    }
}

/// Returns `lat || sep || lon`.
pub fn assemble(lat: &[u8], sep: &[u8], lon: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(lat.len() + sep.len() + lon.len());
    assemble_into(&mut out, lat, sep, lon);
    out
}

/// Overwrites `buf` with `lat || sep || lon`, reusing its allocation.
#[inline]
pub fn assemble_into(buf: &mut Vec<u8>, lat: &[u8], sep: &[u8], lon: &[u8]) {
    buf.clear();
    buf.extend_from_slice(lat);
    buf.extend_from_slice(sep);
    buf.extend_from_slice(lon);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_vector() {
        let candidate = assemble(b"060.15000", b",", b"024.75667");
        assert_eq!(candidate, b"060.15000,024.75667");
        assert_eq!(candidate.len(), 19);
    }

    #[test]
    fn test_assemble_keeps_control_bytes() {
        let candidate = assemble(b"060.00001", b"\n", b"024.40001");
        assert_eq!(candidate, b"060.00001\n024.40001");
        let candidate = assemble(b"060.00001", b"", b"024.40001");
        assert_eq!(candidate, b"060.00001024.40001");
    }

    #[test]
    fn test_assemble_into_reuses_buffer() {
        let mut buf = b"stale contents that are longer".to_vec();
        assemble_into(&mut buf, b"060.15000", b"; ", b"024.75667");
        assert_eq!(buf, b"060.15000; 024.75667");
    }

    #[test]
    fn test_separator_set_dedup_keeps_order() -> Result<(), SeekError> {
        let set = SeparatorSet::new([";", ",", ";", " ", ","])?;
        let seps: Vec<&[u8]> = set.iter().collect();
        assert_eq!(seps, vec![&b";"[..], &b","[..], &b" "[..]]);
        Ok(())
    }

    #[test]
    fn test_separator_set_empty() {
        let empty: Vec<String> = Vec::new();
        assert_eq!(SeparatorSet::new(empty), Err(SeekError::EmptySeparators));
    }

    #[test]
    fn test_default_separators() {
        let set = SeparatorSet::default();
        assert_eq!(set.len(), 4);
        assert_eq!(set.get(3), Some(&b"\n"[..]));
    }
}
