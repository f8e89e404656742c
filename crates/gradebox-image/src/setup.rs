//! Setup-script rendering.
//!
//! The setup script runs exactly once, as root, while the image is built.
//! Ordering matters: the unprivileged account and the permission lockdown
//! must be in place before anything else, since the lockdown is the
//! security boundary that keeps a submission's own code from reading
//! grader internals.

use gradebox_common::constants::{
    AUTOGRADER_ROOT, RESULTS_DIR, SOURCE_DIR, STUDENT_UID, STUDENT_USER,
};

/// Declarative description of what image setup must install and arrange.
#[derive(Debug, Clone)]
pub struct SetupPlan {
    /// Name of the unprivileged grading account.
    pub student_user: String,
    /// OS packages required by the grader payload.
    pub apt_packages: Vec<String>,
    /// Development-only packages (debuggers, diff tools). Rendered into a
    /// separate script so they never inflate the production image.
    pub dev_packages: Vec<String>,
    /// Python requirements manifest inside the payload, if the payload
    /// declares one (path relative to the payload root).
    pub requirements: Option<String>,
    /// Whether to create the results directory owned by the student user.
    pub create_results_dir: bool,
}

impl Default for SetupPlan {
    fn default() -> Self {
        Self {
            student_user: STUDENT_USER.to_string(),
            apt_packages: Vec::new(),
            dev_packages: Vec::new(),
            requirements: None,
            create_results_dir: true,
        }
    }
}

impl SetupPlan {
    /// Renders the production setup script.
    #[must_use]
    pub fn render_setup_script(&self) -> String {
        let mut script = String::from("#!/bin/bash\nset -euo pipefail\n\n");

        // 1. Unprivileged account: no home, no password, cannot log in.
        script.push_str(&format!(
            "useradd --no-create-home --uid {STUDENT_UID} --shell /usr/sbin/nologin {}\n",
            self.student_user
        ));

        // 2. Revoke world access to the grading tree.
        script.push_str(&format!("chmod -R o-rwx {AUTOGRADER_ROOT}\n"));

        // 3. Payload dependencies.
        if !self.apt_packages.is_empty() {
            script.push_str("apt-get update\n");
            script.push_str(&format!(
                "apt-get install -y --no-install-recommends {}\n",
                self.apt_packages.join(" ")
            ));
        }
        if let Some(manifest) = &self.requirements {
            script.push_str(&format!(
                "pip3 install --no-cache-dir -r {SOURCE_DIR}/{manifest}\n"
            ));
        }

        // 4. Writable results location for the grading process. Created
        //    with an explicit mode: the recursive lockdown above ran before
        //    this directory existed, and root's umask would otherwise leave
        //    it world-readable.
        if self.create_results_dir {
            script.push_str(&format!(
                "install -d -m 0750 -o {} {RESULTS_DIR}\n",
                self.student_user
            ));
        }

        script
    }

    /// Renders the development-only script, or `None` when there is
    /// nothing development-specific to install.
    #[must_use]
    pub fn render_dev_script(&self) -> Option<String> {
        if self.dev_packages.is_empty() {
            return None;
        }
        let mut script = String::from("#!/bin/bash\nset -euo pipefail\n\n");
        script.push_str("apt-get update\n");
        script.push_str(&format!(
            "apt-get install -y --no-install-recommends {}\n",
            self.dev_packages.join(" ")
        ));
        Some(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_script_creates_student_user_without_home_or_login() {
        let script = SetupPlan::default().render_setup_script();
        assert!(script.contains("useradd --no-create-home --uid 1000"));
        assert!(script.contains("/usr/sbin/nologin student"));
    }

    #[test]
    fn setup_script_revokes_world_access_before_installing_dependencies() {
        let plan = SetupPlan {
            apt_packages: vec!["gcc".into()],
            requirements: Some("requirements.txt".into()),
            ..SetupPlan::default()
        };
        let script = plan.render_setup_script();
        let lockdown = script.find("chmod -R o-rwx /autograder").expect("lockdown present");
        let install = script.find("apt-get install").expect("install present");
        assert!(lockdown < install);
        assert!(script.contains("pip3 install --no-cache-dir -r /autograder/source/requirements.txt"));
    }

    #[test]
    fn setup_script_assigns_results_dir_to_student() {
        let script = SetupPlan::default().render_setup_script();
        assert!(script.contains("install -d -m 0750 -o student /autograder/results"));
    }

    #[test]
    fn results_dir_is_created_without_world_access() {
        // The recursive lockdown runs before the results directory exists,
        // so its creation must carry its own restrictive mode.
        let script = SetupPlan::default().render_setup_script();
        let lockdown = script.find("chmod -R o-rwx /autograder").expect("lockdown present");
        let results = script.find("install -d -m 0750").expect("results step present");
        assert!(lockdown < results);
        assert!(!script.contains("mkdir -p /autograder/results"));
    }

    #[test]
    fn dev_packages_never_reach_the_production_script() {
        let plan = SetupPlan {
            dev_packages: vec!["gdb".into(), "colordiff".into()],
            ..SetupPlan::default()
        };
        let script = plan.render_setup_script();
        assert!(!script.contains("gdb"));
        assert!(!script.contains("colordiff"));

        let dev = plan.render_dev_script().expect("dev script rendered");
        assert!(dev.contains("gdb colordiff"));
    }

    #[test]
    fn no_dev_packages_means_no_dev_script() {
        assert!(SetupPlan::default().render_dev_script().is_none());
    }

    #[test]
    fn scripts_fail_fast() {
        let script = SetupPlan::default().render_setup_script();
        assert!(script.starts_with("#!/bin/bash\nset -euo pipefail"));
    }
}
