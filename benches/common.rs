// Shared benchmark helpers
// Functions here are used across different benchmark files
#![allow(dead_code)]

use pkgsize::error::Result;
use pkgsize::model::{Flavor, LookupPath, PackageFormat, SizeStore};
use pkgsize::repository::Ancestry;

const ARCHES: [(&str, PackageFormat); 4] = [
    ("amd64", PackageFormat::Deb),
    ("arm64", PackageFormat::Deb),
    ("x86_64", PackageFormat::Rpm),
    ("aarch64", PackageFormat::Suse),
];

pub fn commit_name(i: usize) -> String {
    format!("{:040x}", i)
}

/// Linear history where commit `i`'s parent is commit `i - 1`
pub struct LinearHistory;

impl Ancestry for LinearHistory {
    fn parent(&self, commit: &str) -> Result<Option<String>> {
        let i = usize::from_str_radix(commit, 16).unwrap_or(0);
        Ok((i > 0).then(|| commit_name(i - 1)))
    }
}

pub fn lookup_path() -> LookupPath {
    LookupPath::new("amd64", Flavor::Agent, PackageFormat::Deb)
}

/// Store with `num_commits` commits, recording every package only on every `stride`-th commit
pub fn generate_store(num_commits: usize, stride: usize) -> SizeStore {
    let mut store = SizeStore::new();
    for i in (0..num_commits).step_by(stride.max(1)) {
        let commit = commit_name(i);
        for (arch, format) in ARCHES {
            for flavor in Flavor::ALL {
                let path = LookupPath::new(arch, flavor, format);
                store.record(&commit, &path, (i * 1000) as u64, i as i64);
            }
        }
    }
    store.touch(num_commits as i64);
    store
}
