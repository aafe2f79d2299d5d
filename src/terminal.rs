//! Terminal size probing.

/// Columns of the terminal attached to stdout, when there is one.
#[must_use]
pub fn terminal_columns() -> Option<usize> {
    stdout_winsize().map(|(columns, _rows)| usize::from(columns))
}

#[cfg(unix)]
fn read_winsize(fd: libc::c_int) -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    // SAFETY: TIOCGWINSZ only writes into the provided `winsize`.
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

#[cfg(unix)]
fn stdout_winsize() -> Option<(u16, u16)> {
    read_winsize(libc::STDOUT_FILENO)
}

#[cfg(not(unix))]
fn stdout_winsize() -> Option<(u16, u16)> {
    None
}
