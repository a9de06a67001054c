use vfs_lines::{FsBackend, FsError, LinesFS};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // root `C:`, CWD (Current Working Dir) is the root
    let mut fs = LinesFS::new("C:")?;

    // creates `C:\docs` on the way and places `first.txt` inside it
    fs.mkfile("docs/first.txt", &["Hello"])?;

    // change CWD to `C:\docs`
    fs.cd("docs")?;

    // `second.txt` is created in CWD because mkfile() is always relative
    fs.mkfile("second.txt", &["World"])?;
    println!("second.txt lives at {}", fs.full_path("second.txt")?);

    // a path starting with the root name is resolved from the root, whatever the CWD
    let first = fs.read_lines("C:\\docs\\first.txt")?;

    // `..` moves up, `.` stays
    fs.cd("..")?;
    let second = fs.read_lines("./docs/second.txt")?;

    println!("{}, {}!", first.join(" "), second.join(" "));

    // the same path cannot be created twice
    if let Err(e) = fs.mkfile("docs/first.txt", &["Again"]) {
        if let Some(FsError::DuplicateEntry { path }) = e.downcast_ref::<FsError>() {
            println!("{path} is already there");
        }
    }

    Ok(())
}
