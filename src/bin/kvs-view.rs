extern crate clap;
#[macro_use]
extern crate slog;
extern crate slog_term;

use clap::{crate_version, App, Arg};
use kvs_view::thread_pool::{NaiveThreadPool, RayonThreadPool, SharedQueueThreadPool, ThreadPool};
use kvs_view::{Controller, ControllerConfig, Dispatcher, Entry, Intent, Settled, TcpTransport};
use slog::Drain;
use std::io;
use std::io::BufRead;

fn main() -> kvs_view::Result<()> {
    if let Err(e) = run_kvs_view() {
        // Print the Display message for any error.
        // Simply returning the error will print the Debug version, which is not as nice.
        eprintln!("{}", e);
        std::process::exit(1)
    }
    Ok(())
}

fn run_kvs_view() -> kvs_view::Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    let matches = App::new(env!("CARGO_PKG_NAME"))
        .version(crate_version!())
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .after_help(
            "Reads commands from stdin, one per line:\n    \
             set KEY,VALUE | get KEY | delete KEY | list | wait",
        )
        .arg(
            Arg::with_name("addr")
                .help("An IP address, either v4 or v6, and a port number, with the format IP:PORT")
                .long("addr")
                .takes_value(true)
                .value_name("ADDR")
                .default_value("127.0.0.1:4000"),
        )
        .arg(
            Arg::with_name("separator")
                .help("Separates the key from the value in set commands")
                .long("separator")
                .takes_value(true)
                .value_name("CHAR")
                .default_value(","),
        )
        .arg(
            Arg::with_name("pool")
                .help("Thread pool used for remote calls")
                .long("pool")
                .takes_value(true)
                .possible_values(&["naive", "shared-queue", "rayon"])
                .default_value("shared-queue")
                .value_name("POOL"),
        )
        .arg(
            Arg::with_name("threads")
                .help("Number of threads in the pool [default: number of CPUs]")
                .long("threads")
                .takes_value(true)
                .value_name("N"),
        )
        .arg(
            Arg::with_name("verbose")
                .help("Log every dispatch and snapshot update")
                .short("v")
                .long("verbose"),
        )
        .get_matches();

    let level = if matches.is_present("verbose") {
        slog::Level::Debug
    } else {
        slog::Level::Info
    };
    let decorator = slog_term::PlainSyncDecorator::new(io::stderr());
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog::LevelFilter::new(drain, level).fuse();
    let log = slog::Logger::root(drain, o!("version" => version));

    let addr = matches.value_of("addr").unwrap_or("127.0.0.1:4000");
    let separator = parse_separator(matches.value_of("separator").unwrap_or(","))?;
    let threads = match matches.value_of("threads") {
        Some(threads) => threads.parse::<u32>()?,
        None => num_cpus::get() as u32,
    };
    if threads == 0 {
        return Err(KvsViewCliError::NoThreads.into());
    }
    let pool = matches.value_of("pool").unwrap_or("shared-queue");

    info!(log, "Starting kvs-view"; "addr" => addr, "pool" => pool, "threads" => threads);

    let transport = TcpTransport::new(addr)?;
    let controller = Controller::new(log, transport).configure(ControllerConfig { separator });

    match pool {
        "naive" => session(Dispatcher::new(controller, NaiveThreadPool::new(threads)?)),
        "rayon" => session(Dispatcher::new(controller, RayonThreadPool::new(threads)?)),
        _ => session(Dispatcher::new(
            controller,
            SharedQueueThreadPool::new(threads)?,
        )),
    }
}

fn parse_separator(raw: &str) -> kvs_view::Result<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(KvsViewCliError::BadSeparator {
            separator: raw.to_owned(),
        }
        .into()),
    }
}

fn session<P: ThreadPool>(mut dispatcher: Dispatcher<TcpTransport, P>) -> kvs_view::Result<()> {
    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;
        let mut parts = line.trim_start().splitn(2, char::is_whitespace);
        let command = parts.next().unwrap_or("");
        let rest = parts.next().unwrap_or("");

        let intent = match command {
            "" => None,
            "set" => Some(Intent::Set(rest.to_owned())),
            "get" => Some(Intent::Get(rest.to_owned())),
            "delete" | "rm" => Some(Intent::Delete(rest.to_owned())),
            "list" => {
                print_snapshot(dispatcher.controller().snapshot());
                None
            }
            "wait" => {
                dispatcher.settle_all().iter().for_each(print_settled);
                None
            }
            other => {
                eprintln!(
                    "{}",
                    KvsViewCliError::UnknownCommand {
                        command: other.to_owned()
                    }
                );
                None
            }
        };

        if let Some(intent) = intent {
            if let Err(e) = dispatcher.submit(intent) {
                eprintln!("{}", e);
            }
        }

        while let Some(settled) = dispatcher.try_settle() {
            print_settled(&settled);
        }
    }

    dispatcher.settle_all().iter().for_each(print_settled);
    print_snapshot(dispatcher.controller().snapshot());

    Ok(())
}

fn print_settled(settled: &Settled) {
    match &settled.result {
        Ok(report) => println!("{}", report),
        Err(e) => eprintln!("{}", e),
    }
}

fn print_snapshot(entries: &[Entry]) {
    if entries.is_empty() {
        println!("(empty)");
    }
    for entry in entries {
        println!("{}", entry);
    }
}

#[derive(Debug, failure::Fail)]
enum KvsViewCliError {
    #[fail(display = "Unknown command: {}", command)]
    UnknownCommand { command: String },

    #[fail(display = "Separator must be a single character, got '{}'", separator)]
    BadSeparator { separator: String },

    #[fail(display = "At least one thread is needed for remote calls")]
    NoThreads,
}
