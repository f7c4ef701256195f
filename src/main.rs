use std::env;
use std::io::{self, BufWriter, Write};
use std::thread;
use std::time::Instant;

use thermite::engine;
use thermite::mapping::MappedFile;
use thermite::output;

#[cfg(feature = "profiling")]
mod profiling {
    use std::fs::File;
    use std::io;

    pub struct Profiler(pprof::ProfilerGuard<'static>);

    pub fn start() -> Profiler {
        Profiler(pprof::ProfilerGuard::new(100).expect("could not start profiler"))
    }

    impl Profiler {
        pub fn write_flamegraph(self) -> io::Result<()> {
            let report = self.0.report().build().expect("could not build profile");
            report
                .flamegraph(File::create("flamegraph.svg")?)
                .expect("could not write flamegraph");
            Ok(())
        }
    }
}

#[cfg(not(feature = "profiling"))]
mod profiling {
    use std::io;

    pub struct Profiler;

    pub fn start() -> Profiler {
        eprintln!("PROFILE=true ignored: rebuild with --features profiling");
        Profiler
    }

    impl Profiler {
        pub fn write_flamegraph(self) -> io::Result<()> {
            Ok(())
        }
    }
}

fn main() -> io::Result<()> {
    let start = Instant::now();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "measurements.txt".to_string());
    let timer = env::var("TIMER").is_ok_and(|v| v == "true");
    let profiler = env::var("PROFILE")
        .is_ok_and(|v| v == "true")
        .then(profiling::start);

    let workers = thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);

    let mapped = MappedFile::open(&path)?;
    let stations = engine::aggregate(mapped.bytes(), workers);

    let mut stdout = BufWriter::new(io::stdout().lock());
    stdout.write_all(output::render(stations).as_bytes())?;
    stdout.flush()?;

    if let Some(profiler) = profiler {
        profiler.write_flamegraph()?;
    }

    if timer {
        eprintln!("elapsed: {:?}", start.elapsed());
    }

    Ok(())
}
