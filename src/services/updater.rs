//! Update status holder.
//!
//! Fetching releases is handled outside the menu; this type only tracks the
//! state the menu displays and the requests it makes.

use super::{UpdateStatus, Updater};

#[derive(Debug)]
pub struct LocalUpdater {
    status: UpdateStatus,
    just_updated: bool,
    staged: bool,
}

impl LocalUpdater {
    pub fn new(status: UpdateStatus, just_updated: bool) -> Self {
        Self {
            status,
            just_updated,
            staged: false,
        }
    }

    pub fn set_status(&mut self, status: UpdateStatus) {
        log::debug!("UPDATE: {:?} -> {:?}", self.status, status);
        self.status = status;
    }

    /// Whether an update should be applied when the application exits.
    pub fn is_staged(&self) -> bool {
        self.staged
    }
}

impl Default for LocalUpdater {
    fn default() -> Self {
        Self::new(UpdateStatus::NoUpdate, false)
    }
}

impl Updater for LocalUpdater {
    fn status(&self) -> UpdateStatus {
        self.status
    }

    fn just_updated(&self) -> bool {
        self.just_updated
    }

    fn start_download(&mut self) {
        if self.status == UpdateStatus::UpdateAvailable {
            log::info!("UPDATE: Download requested");
            self.set_status(UpdateStatus::UpdateDownloading);
        }
    }

    fn prepare_update(&mut self) {
        if self.status == UpdateStatus::UpdateDownloaded {
            log::info!("UPDATE: Update staged for next launch");
            self.staged = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn download_only_starts_when_available() {
        let mut updater = LocalUpdater::default();
        updater.start_download();
        assert_eq!(updater.status(), UpdateStatus::NoUpdate);
        assert!(!updater.show_button());

        updater.set_status(UpdateStatus::UpdateAvailable);
        assert!(updater.show_button());
        updater.start_download();
        assert_eq!(updater.status(), UpdateStatus::UpdateDownloading);
    }

    #[test]
    fn prepare_requires_a_finished_download() {
        let mut updater = LocalUpdater::new(UpdateStatus::UpdateDownloading, false);
        updater.prepare_update();
        assert!(!updater.is_staged());
        updater.set_status(UpdateStatus::UpdateDownloaded);
        updater.prepare_update();
        assert!(updater.is_staged());
    }
}
