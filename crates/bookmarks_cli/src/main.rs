//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open a bookmark store (file path argument, or in-memory) and print the
//!   collection in display order.
//! - Optionally filter the printout by a search query.
//! - Optionally write core logs under an absolute directory.
//!
//! Usage: `bookmarks_cli [DB_PATH] [QUERY] [LOG_DIR]`

use bookmarks_core::db::{open_db, open_db_in_memory};
use bookmarks_core::{
    core_version, default_log_level, init_logging, BookmarkApp, SqliteKeyValueStore,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let db_path = args.next();
    let query = args.next().unwrap_or_default();

    if let Some(log_dir) = args.next() {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("failed to start logging: {err}");
            return ExitCode::FAILURE;
        }
    }

    let conn = match db_path.as_deref() {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    let conn = match conn {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };
    let store = match SqliteKeyValueStore::try_new(&conn) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("store not ready: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = BookmarkApp::open(store);
    app.set_query(&query);

    println!("bookmarks_core version={}", core_version());
    println!("source={:?}", app.load_source());
    let view = app.view();
    for group in view.sorted_groups() {
        println!("[{}] {}", group.order, group.name);
        for bookmark in group.sorted_bookmarks() {
            println!("    {}. {} <{}>", bookmark.order, bookmark.title, bookmark.url);
        }
    }
    if app.query().is_active() {
        println!("matches={}", app.match_count());
    }
    ExitCode::SUCCESS
}
