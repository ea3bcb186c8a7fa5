use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::num::NonZeroU32;

use crate::memory::fragment::Fragment;
use crate::memory::sparse_file::SparseFile;

// Walks a SparseFile in windows [0, n), [n, 2n), ... and yields the fragments of each
// window. Empty windows are skipped. Fresh per call to SparseFile::pages, so walks are
// independent of each other.
#[derive(Clone, Debug)]
pub struct Pages<'a> {
    file: &'a SparseFile,
    page_size: u32,
    next_start: u32,
    // Fragments of the current page that haven't been handed out yet.
    pending: VecDeque<Fragment>,
}

impl<'a> Pages<'a> {
    pub(crate) fn new(file: &'a SparseFile, page_size: NonZeroU32) -> Pages<'a> {
        Pages {
            file,
            page_size: page_size.get(),
            next_start: 0,
            pending: VecDeque::new(),
        }
    }
}

impl Iterator for Pages<'_> {
    type Item = Fragment;

    fn next(&mut self) -> Option<Fragment> {
        while self.pending.is_empty() && self.next_start < self.file.current_size() {
            let end = std::cmp::min(self.next_start.saturating_add(self.page_size), self.file.size_limit());
            self.pending.extend(self.file.runs(self.next_start, end));
            self.next_start = self.next_start.saturating_add(self.page_size);
        }

        self.pending.pop_front()
    }
}

impl FusedIterator for Pages<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_size(size: u32) -> NonZeroU32 {
        NonZeroU32::new(size).unwrap()
    }

    fn build_file() -> SparseFile {
        let mut file = SparseFile::with_limit(256).unwrap();

        // Page 0 stays empty.
        for i in 0..64 {
            file.put_byte(64 + i, i as u8).unwrap();
        }

        // Page 2 has three separate runs.
        for i in 0..32 {
            file.put_byte(128 + i, i as u8).unwrap();
        }
        file.put_byte(170, 1).unwrap();
        file.put_byte(171, 2).unwrap();
        file.put_byte(191, 3).unwrap();

        // Page 3 only at the end.
        file.put_byte(255, 1).unwrap();
        file
    }

    #[test]
    fn standard_iteration() {
        let file = build_file();
        let layout: Vec<_> = file.pages(page_size(64))
            .map(|fragment| (fragment.position(), fragment.length()))
            .collect();
        assert_eq!(layout, vec![(64, 64), (128, 32), (170, 2), (191, 1), (255, 1)]);
    }

    #[test]
    fn runs_are_split_at_page_boundaries() {
        let file = build_file();
        let layout: Vec<_> = file.pages(page_size(48))
            .map(|fragment| (fragment.position(), fragment.length()))
            .collect();
        assert_eq!(layout, vec![(64, 32), (96, 48), (144, 16), (170, 2), (191, 1), (255, 1)]);

        for fragment in file.pages(page_size(48)) {
            assert_eq!(fragment.position() / 48, (fragment.end() - 1) / 48, "{fragment} crosses a page");
        }
    }

    #[test]
    fn last_page_is_cut_at_size_limit() {
        let mut file = SparseFile::with_limit(16).unwrap();
        for i in 0..16 {
            file.put_byte(i, i as u8).unwrap();
        }

        let fragments: Vec<_> = file.pages(page_size(64)).collect();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].position(), 0);
        assert_eq!(fragments[0].data(), (0..16).collect::<Vec<u8>>().as_slice());
    }

    #[test]
    fn huge_page_size_does_not_overflow() {
        let mut file = SparseFile::new();
        file.put_byte(0xFFFF, 7).unwrap();

        let fragments: Vec<_> = file.pages(page_size(u32::MAX)).collect();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].position(), 0xFFFF);
    }

    #[test]
    fn empty_file_yields_nothing() {
        let file = SparseFile::new();
        assert_eq!(file.pages(page_size(1)).next(), None);
    }

    #[test]
    fn walks_are_independent() {
        let file = build_file();
        let mut first = file.pages(page_size(64));
        first.next();
        first.next();

        let second: Vec<_> = file.pages(page_size(64)).collect();
        assert_eq!(second.len(), 5);
        assert_eq!(first.count(), 3);
    }
}
