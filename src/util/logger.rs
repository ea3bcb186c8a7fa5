use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

pub fn init(logger: Logger) -> Result<(), SetLoggerError> {
    let max_level = logger.max_level();
    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(max_level))
}

// Prints romhex's log output to stdout. The chatty per-record and per-write targets are
// off unless requested.
#[derive(Clone, Copy, Debug, Default)]
pub struct Logger {
    pub log_hex_records: bool,
    pub log_sparse_writes: bool,
}

impl Logger {
    fn max_level(&self) -> LevelFilter {
        if self.log_sparse_writes {
            LevelFilter::Trace
        } else if self.log_hex_records {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        match metadata.target() {
            "" => true,
            "hexrecords" => self.log_hex_records,
            "sparsewrites" => self.log_sparse_writes,
            target => {
                let chunks: Vec<&str> = target.split("::").collect();
                match chunks[..] {
                    ["romhex", ..] => metadata.level() <= Level::Info,
                    _ => false,
                }
            }
        }
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if record.level() < Level::Info {
                print!("{} - ", record.level());
            }

            match record.target() {
                "hexrecords" => print!("HEX RECORDS "),
                "sparsewrites" => print!("SPARSE WRITES "),
                _ => {}
            }

            println!("{}", record.args());
        }
    }

    fn flush(&self) {}
}
