//! Batch accumulation.
//!
//! Records are buffered until the configured batch size is reached and then
//! handed out as a [`Batch`]. Batch boundaries depend only on the count of
//! records; every record lands in exactly one batch, in input order.

use std::mem;

use crate::errors::PipelineError;
use graph_loader_shared::{FieldSet, Record};

/// An ordered run of same-shaped records plus the field set they share.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch<R> {
    fields: FieldSet,
    records: Vec<R>,
}

impl<R> Batch<R> {
    /// Field names every record of the batch carries, in order.
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn into_records(self) -> Vec<R> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Buffers records and emits them in batches of a fixed size.
///
/// The field set is frozen from the first record ever added (or supplied up
/// front) and every later record must match it.
#[derive(Debug)]
pub struct BatchAccumulator<R> {
    batch_size: usize,
    fields: Option<FieldSet>,
    buffer: Vec<R>,
}

impl<R: Record> BatchAccumulator<R> {
    /// Create an accumulator emitting batches of `batch_size` records.
    pub fn new(batch_size: usize) -> Result<Self, PipelineError> {
        if batch_size == 0 {
            return Err(PipelineError::InvalidBatchSize(0));
        }

        Ok(Self {
            batch_size,
            fields: None,
            buffer: Vec::with_capacity(batch_size),
        })
    }

    /// Create an accumulator whose field set is known before the first record.
    pub fn with_field_set(batch_size: usize, fields: FieldSet) -> Result<Self, PipelineError> {
        let mut accumulator = Self::new(batch_size)?;
        accumulator.fields = Some(fields);
        Ok(accumulator)
    }

    /// Append a record, returning a full batch once `batch_size` is reached.
    ///
    /// Fails with `FieldSetDrift` if the record's fields differ from the
    /// frozen field set; the record is then not buffered.
    pub fn add(&mut self, record: R) -> Result<Option<Batch<R>>, PipelineError> {
        match &self.fields {
            Some(fields) if !record.matches_field_set(fields) => {
                return Err(PipelineError::FieldSetDrift {
                    expected: fields.clone(),
                    found: record.field_set(),
                });
            }
            Some(_) => {}
            None => self.fields = Some(record.field_set()),
        }

        self.buffer.push(record);
        if self.buffer.len() < self.batch_size {
            return Ok(None);
        }
        Ok(self.take())
    }

    /// Hand out whatever is buffered, or `None` if nothing is.
    pub fn flush(&mut self) -> Option<Batch<R>> {
        self.take()
    }

    /// Number of records waiting for the next batch.
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn field_set(&self) -> Option<&FieldSet> {
        self.fields.as_ref()
    }

    fn take(&mut self) -> Option<Batch<R>> {
        if self.buffer.is_empty() {
            return None;
        }

        let records = mem::replace(&mut self.buffer, Vec::with_capacity(self.batch_size));
        Some(Batch {
            fields: self.fields.clone().unwrap_or_default(),
            records,
        })
    }
}
