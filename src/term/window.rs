//! Console window visibility

use std::io;

/// Shows and hides the window hosting the console
pub trait WindowController {
    fn show(&mut self) -> io::Result<()>;
    fn hide(&mut self) -> io::Result<()>;
}

/// Controller for consoles without a window of their own
#[derive(Clone, Copy, Debug, Default)]
pub struct Headless;

impl WindowController for Headless {
    fn show(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn hide(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Controller for the Windows console window of this process
#[cfg(windows)]
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleWindow;

#[cfg(windows)]
impl ConsoleWindow {
    fn set_state(cmd: windows::Win32::UI::WindowsAndMessaging::SHOW_WINDOW_CMD) {
        use windows::Win32::System::Console::GetConsoleWindow;
        use windows::Win32::UI::WindowsAndMessaging::ShowWindow;

        unsafe {
            let hwnd = GetConsoleWindow();
            // Returns the previous visibility, not success
            let _ = ShowWindow(hwnd, cmd);
        }
    }
}

#[cfg(windows)]
impl WindowController for ConsoleWindow {
    fn show(&mut self) -> io::Result<()> {
        Self::set_state(windows::Win32::UI::WindowsAndMessaging::SW_SHOW);
        Ok(())
    }

    fn hide(&mut self) -> io::Result<()> {
        Self::set_state(windows::Win32::UI::WindowsAndMessaging::SW_HIDE);
        Ok(())
    }
}

/// Window controller suited to the current platform
pub fn platform_window() -> Box<dyn WindowController> {
    #[cfg(windows)]
    {
        Box::new(ConsoleWindow)
    }
    #[cfg(not(windows))]
    {
        Box::new(Headless)
    }
}
