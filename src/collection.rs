//! This module provides [`SpectrumCollection`], the in-memory list of everything that has been
//! imported so far. Only spectra that made it all the way to color coordinates are kept; failed
//! imports are logged and dropped. Whoever displays the collection (a chromaticity plot, a table)
//! can register an [`ImportListener`] to hear about new data instead of polling for it.

use std::fmt;
use std::ops::Index;
use std::path::Path;
use std::slice;

use crate::record::{RecordId, SpectrumRecord};
use crate::settings::ConversionSettings;

/// Gets told when a batch import has added records to a collection.
pub trait ImportListener {
    /// Called once after a batch, with the number of records it added. Batches that add nothing
    /// don't call this at all.
    fn files_imported(&mut self, count: usize);
}

impl<F: FnMut(usize)> ImportListener for F {
    fn files_imported(&mut self, count: usize) {
        self(count)
    }
}

/// An ordered collection of successfully imported spectra.
///
/// `L` is the type of the listener. A new collection expects a boxed closure, and
/// [`with_listener`](SpectrumCollection::with_listener) switches it to whatever listener it's given.
///
/// # Example
/// ```
/// # use spectrocie::collection::SpectrumCollection;
/// # use spectrocie::record::SpectrumRecord;
/// # use spectrocie::settings::ConversionSettings;
/// let mut collection = SpectrumCollection::new();
/// let settings = ConversionSettings::default();
/// let good = SpectrumRecord::from_text("a.txt", "450 0.2\n500 0.5\n550 0.9\n", &settings);
/// let bad = SpectrumRecord::from_text("b.txt", "no data here", &settings);
/// assert!(collection.add(good));
/// assert!(!collection.add(bad));
/// assert_eq!(collection.len(), 1);
/// let (xs, ys) = collection.coordinates();
/// assert_eq!((xs.len(), ys.len()), (1, 1));
/// ```
pub struct SpectrumCollection<L = Box<dyn FnMut(usize) + Send>> {
    records: Vec<SpectrumRecord>,
    listener: Option<L>,
    settings: ConversionSettings,
}

impl<L> fmt::Debug for SpectrumCollection<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SpectrumCollection")
            .field("records", &self.records)
            .field("listener", &self.listener.is_some())
            .field("settings", &self.settings)
            .finish()
    }
}

impl SpectrumCollection {
    /// An empty collection with the default settings and no listener.
    pub fn new() -> SpectrumCollection {
        SpectrumCollection::with_settings(ConversionSettings::default())
    }

    /// An empty collection whose imports use the given settings.
    pub fn with_settings(settings: ConversionSettings) -> SpectrumCollection {
        SpectrumCollection {
            records: Vec::new(),
            listener: None,
            settings,
        }
    }
}

impl Default for SpectrumCollection {
    fn default() -> SpectrumCollection {
        SpectrumCollection::new()
    }
}

impl<L: ImportListener> SpectrumCollection<L> {
    /// Attaches a listener, replacing any previous one. The collection takes on the type of the
    /// listener, so it is `Send` exactly when the listener is, and a listener holding an `Rc` works
    /// as well as one holding an `Arc`.
    pub fn with_listener<M: ImportListener>(self, listener: M) -> SpectrumCollection<M> {
        SpectrumCollection {
            records: self.records,
            listener: Some(listener),
            settings: self.settings,
        }
    }

    /// Replaces the listener with another of the same type.
    pub fn set_listener(&mut self, listener: L) {
        self.listener = Some(listener);
    }

    /// The settings that [`import_batch`](SpectrumCollection::import_batch) uses.
    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    /// Appends a record if it was imported successfully, and returns whether it was.
    pub fn add(&mut self, record: SpectrumRecord) -> bool {
        if record.success() {
            self.records.push(record);
            true
        } else {
            false
        }
    }

    /// Imports every file in `paths`, in order, with the collection's settings. Returns how many
    /// made it in. Files that fail don't stop the rest of the batch.
    pub fn import_batch<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let settings = self.settings.clone();
        self.import_batch_with(paths, &settings)
    }

    /// Like [`import_batch`](SpectrumCollection::import_batch), but with one-off settings.
    pub fn import_batch_with<I, P>(&mut self, paths: I, settings: &ConversionSettings) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut attempted = 0;
        let mut added = 0;
        for path in paths {
            attempted += 1;
            if self.add(SpectrumRecord::from_file_with(path, settings)) {
                added += 1;
            }
        }
        info!("imported {} of {} spectrum files", added, attempted);
        if added > 0 {
            if let Some(listener) = self.listener.as_mut() {
                listener.files_imported(added);
            }
        }
        added
    }

    /// Removes the record with this id and hands it back. Does nothing if there is no such record.
    pub fn remove(&mut self, id: RecordId) -> Option<SpectrumRecord> {
        let index = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(index))
    }

    /// The CIE x and y of every record, in collection order, ready to be scattered on a
    /// chromaticity diagram.
    pub fn coordinates(&self) -> (Vec<f64>, Vec<f64>) {
        self.records
            .iter()
            .filter_map(|record| record.xy())
            .map(|xy| (xy.x, xy.y))
            .unzip()
    }

    /// The number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at `index`, if there is one.
    pub fn get(&self, index: usize) -> Option<&SpectrumRecord> {
        self.records.get(index)
    }

    /// The record with this id, if it's still in the collection.
    pub fn find(&self, id: RecordId) -> Option<&SpectrumRecord> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Iterates over the records from the first. Every call starts over.
    pub fn iter(&self) -> slice::Iter<SpectrumRecord> {
        self.records.iter()
    }
}

impl<L> Index<usize> for SpectrumCollection<L> {
    type Output = SpectrumRecord;

    fn index(&self, index: usize) -> &SpectrumRecord {
        &self.records[index]
    }
}

impl<'a, L> IntoIterator for &'a SpectrumCollection<L> {
    type Item = &'a SpectrumRecord;
    type IntoIter = slice::Iter<'a, SpectrumRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
