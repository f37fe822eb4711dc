//! Parallel chunk compression using a producer-consumer pipeline.
//!
//! Architecture:
//! - Producer thread: slices the input into chunks and sends jobs
//! - Worker pool: compresses chunks independently
//! - Calling thread: receives compressed chunks and restores input order

use std::collections::BTreeMap;

use crossbeam::channel::{bounded, Receiver, Sender};
use tracing::debug;

use super::single::{encode_chunk, EncodedChunk, SingleThreadedCompressor};
use super::ChunkCompressor;
use crate::error::{Error, Result};
use crate::CompressionConfig;

/// Upper bound on worker threads
pub const MAX_THREADS: usize = 32;

/// A job for compressing a single chunk
struct ChunkJob<'a> {
    /// Sequence number for ordering output
    index: usize,
    data: &'a [u8],
}

/// Parallel chunk compressor
#[derive(Clone, Copy, Debug)]
pub struct ParallelCompressor {
    num_threads: usize,
}

impl ParallelCompressor {
    /// `num_threads` of 0 means one thread per CPU
    pub fn new(num_threads: usize) -> Self {
        Self { num_threads }
    }

    pub fn effective_threads(&self) -> usize {
        match self.num_threads {
            0 => num_cpus::get().clamp(1, MAX_THREADS),
            n => n.clamp(1, MAX_THREADS),
        }
    }
}

impl ChunkCompressor for ParallelCompressor {
    fn compress_chunks(&self, input: &[u8], config: &CompressionConfig) -> Result<Vec<EncodedChunk>> {
        let chunk_count = input.chunks(config.chunk_size).len();
        let num_threads = self.effective_threads().min(chunk_count);

        // Nothing to overlap, delegate to the sequential path
        if num_threads <= 1 {
            return SingleThreadedCompressor.compress_chunks(input, config);
        }

        debug!(threads = num_threads, chunks = chunk_count, "compressing chunks in parallel");

        // Enough to keep workers busy without holding every chunk's tokens in flight
        let channel_capacity = num_threads * 4;
        let (job_tx, job_rx): (Sender<ChunkJob>, Receiver<ChunkJob>) = bounded(channel_capacity);
        let (result_tx, result_rx): (Sender<Result<EncodedChunk>>, Receiver<Result<EncodedChunk>>) =
            bounded(channel_capacity);

        // Scoped threads can borrow the input slices directly
        let result = crossbeam::scope(|scope| {
            for _ in 0..num_threads {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();

                scope.spawn(move |_| {
                    worker_thread(job_rx, result_tx, config);
                });
            }

            // Drop our copies so the channels close when the other ends finish
            drop(job_rx);
            drop(result_tx);

            let chunk_size = config.chunk_size;
            scope.spawn(move |_| {
                for (index, data) in input.chunks(chunk_size).enumerate() {
                    if job_tx.send(ChunkJob { index, data }).is_err() {
                        // Workers are gone, the collector already has an error
                        break;
                    }
                }
            });

            collect_in_order(result_rx, chunk_count)
        });

        result.map_err(|_| Error::Internal("Thread panicked".to_string()))?
    }
}

/// Worker thread function: compresses chunks until the job channel closes
fn worker_thread(
    job_rx: Receiver<ChunkJob>,
    result_tx: Sender<Result<EncodedChunk>>,
    config: &CompressionConfig,
) {
    while let Ok(job) = job_rx.recv() {
        let result = encode_chunk(job.index, job.data, config);

        if result_tx.send(result).is_err() {
            // Collector has stopped, exit
            break;
        }
    }
}

/// Receive `expected` chunks in any order and return them in index order.
///
/// Returns on the first error; dropping the receiver stops the workers.
fn collect_in_order(
    result_rx: Receiver<Result<EncodedChunk>>,
    expected: usize,
) -> Result<Vec<EncodedChunk>> {
    let mut ordered = Vec::with_capacity(expected);
    let mut pending: BTreeMap<usize, EncodedChunk> = BTreeMap::new();

    while ordered.len() < expected {
        let chunk = match result_rx.recv() {
            Ok(result) => result?,
            Err(_) => return Err(Error::Internal("Workers disconnected".to_string())),
        };

        if chunk.summary.index == ordered.len() {
            ordered.push(chunk);

            // Release any consecutive buffered chunks
            while let Some(buffered) = pending.remove(&ordered.len()) {
                ordered.push(buffered);
            }
        } else {
            // Buffer out-of-order chunk
            pending.insert(chunk.summary.index, chunk);
        }
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_input(size: usize) -> Vec<u8> {
        let patterns: [&[u8]; 3] = [b"ACGTACGTACGTACGT", b"NNNNNNNNNNNNNNNN", b"the quick fox "];
        let mut data = Vec::with_capacity(size);
        let mut i = 0;
        while data.len() < size {
            let pattern = patterns[i % patterns.len()];
            let take = (size - data.len()).min(pattern.len());
            data.extend_from_slice(&pattern[..take]);
            i += 1;
        }
        data
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let config = CompressionConfig {
            base_window_size: 256,
            max_window_size: 1024,
            chunk_size: 1000,
            ..Default::default()
        };
        let input = mixed_input(20_000);

        let sequential = SingleThreadedCompressor.compress_chunks(&input, &config).unwrap();
        let parallel = ParallelCompressor::new(4).compress_chunks(&input, &config).unwrap();

        assert_eq!(sequential.len(), parallel.len());
        for (a, b) in sequential.iter().zip(&parallel) {
            assert_eq!(a.summary, b.summary);
            assert_eq!(a.tokens, b.tokens);
        }
    }

    #[test]
    fn test_parallel_empty_input() {
        let config = CompressionConfig::default();
        let chunks = ParallelCompressor::new(4).compress_chunks(b"", &config).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_parallel_single_chunk() {
        let config = CompressionConfig { chunk_size: 1 << 20, ..Default::default() };
        let input = mixed_input(5000);
        let chunks = ParallelCompressor::new(8).compress_chunks(&input, &config).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].summary.len, 5000);
    }

    #[test]
    fn test_effective_threads() {
        let auto = ParallelCompressor::new(0);
        let threads = auto.effective_threads();
        assert!(threads >= 1);
        assert!(threads <= MAX_THREADS);

        assert_eq!(ParallelCompressor::new(100).effective_threads(), MAX_THREADS); // Capped at 32
        assert_eq!(ParallelCompressor::new(3).effective_threads(), 3);
    }
}
