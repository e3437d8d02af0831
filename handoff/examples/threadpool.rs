//! A fixed-size worker pool fed through a ring-buffered channel.
//!
//! Workers park on `read` until work arrives; `close` plus `join` is the
//! whole shutdown protocol. Submission blocks while the queue is full,
//! so a slow pool backpressures the submitter instead of piling up jobs.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example threadpool

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use handoff::{ReadStatus, Ring};
use log::info;

type Job = Box<dyn FnOnce() + Send>;

const WORKERS: usize = 4;
const JOBS: usize = 16;

fn main() {
    env_logger::init();

    let queue = Arc::new(Ring::<Job>::with_capacity(8).expect("capacity is positive"));

    let workers: Vec<_> = (0..WORKERS)
        .map(|id| {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                while let ReadStatus::Success(job) = queue.read() {
                    let start = Instant::now();
                    job();
                    info!("worker {id} finished a job in {:?}", start.elapsed());
                }
                info!("worker {id} stopping");
            })
        })
        .collect();

    for n in 0..JOBS {
        let job: Job = Box::new(move || {
            thread::sleep(Duration::from_millis(25));
            info!("job {n} ran");
        });
        if queue.write(job).is_err() {
            eprintln!("queue closed before all jobs were submitted");
            break;
        }
    }

    queue.close();
    for worker in workers {
        worker.join().unwrap();
    }
    info!("all workers joined");
}
