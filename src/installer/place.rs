use std::ffi::OsString;

use crate::error::InstallError;
use crate::installer::target::InstallTarget;
use crate::privilege::PrivilegeBroker;
use crate::source::SourceArtifacts;
use crate::utils::{print_message, TagColor};

/// Copies the binary and the library set into the install root, replacing
/// any prior installation outright.
pub struct Placer<'a> {
    broker: &'a PrivilegeBroker,
}

impl<'a> Placer<'a> {
    pub fn new(broker: &'a PrivilegeBroker) -> Self {
        Self { broker }
    }

    pub fn install(
        &self,
        source: &SourceArtifacts,
        target: &InstallTarget,
    ) -> Result<(), InstallError> {
        print_message(
            "INSTALLING",
            &format!("{} -> {}", source.binary.display(), target.binary.display()),
            TagColor::Blue,
        );

        self.broker.install_dir(&target.bindir, "755")?;
        if let Some(bin_parent) = target.binary.parent() {
            self.broker.install_dir(bin_parent, "755")?;
        }
        self.broker.install_file(&source.binary, &target.binary, "755")?;

        // Full replace of the library directory. A merge would leave stale
        // backend libraries from a previous build next to the new set.
        self.broker
            .run("rm", ["-rf".into(), target.lib_dir.clone().into_os_string()])?;
        self.broker.install_dir(&target.lib_dir, "755")?;

        let mut contents = source.lib_dir.clone().into_os_string();
        contents.push("/.");
        self.broker.run(
            "cp",
            [
                OsString::from("-RPp"),
                contents,
                target.lib_dir.clone().into_os_string(),
            ],
        )?;

        let path_entry = target.path_entry();
        if path_entry != target.binary {
            print_message(
                "LINKING",
                &format!("{} -> {}", path_entry.display(), target.binary.display()),
                TagColor::Blue,
            );
            self.broker.run(
                "ln",
                [
                    OsString::from("-sf"),
                    target.binary.clone().into_os_string(),
                    path_entry.into_os_string(),
                ],
            )?;
        }

        Ok(())
    }
}
