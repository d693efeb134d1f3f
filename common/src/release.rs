use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::{Error, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReleaseErr {
    #[error("malformed release version `{0}`")]
    Malformed(String),
}

/// A release version of the form `<major>.<minor>.<patch>`, where the
/// patch segment is either a number or the literal `z` denoting the
/// un-pinned maintenance stream of that minor release.
///
/// Releases in different major lines never participate in the same
/// "already fixed" comparison; see [`Release::same_major`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Release {
    pub major: u32,
    pub minor: u32,
    pub patch: Patch,
}

/// The patch segment of a [`Release`].
///
/// The maintenance stream collects fixes published after any numbered
/// patch of its minor release, so it orders last within that minor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Patch {
    Number(u32),
    Stream,
}

impl Release {
    /// Whether both releases belong to the same major-version line.
    pub fn same_major(&self, other: &Release) -> bool {
        self.major == other.major
    }
}

impl Display for Release {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.patch {
            Patch::Number(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            Patch::Stream => write!(f, "{}.{}.z", self.major, self.minor),
        }
    }
}

impl FromStr for Release {
    type Err = ReleaseErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ReleaseErr::Malformed(s.to_string());

        let parts = s.split('.').collect::<Vec<_>>();
        if parts.len() != 3 {
            return Err(malformed());
        }

        let major = parts[0].parse().map_err(|_| malformed())?;
        let minor = parts[1].parse().map_err(|_| malformed())?;
        let patch = match parts[2] {
            "z" => Patch::Stream,
            number => Patch::Number(number.parse().map_err(|_| malformed())?),
        };

        Ok(Release {
            major,
            minor,
            patch,
        })
    }
}

impl Serialize for Release {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_str())
    }
}

impl<'de> Deserialize<'de> for Release {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(ReleaseVisitor)
    }
}

struct ReleaseVisitor;

impl<'de> Visitor<'de> for ReleaseVisitor {
    type Value = Release;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a release version")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Release::from_str(v).map_err(E::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{Patch, Release};

    fn release(s: &str) -> Release {
        s.parse().unwrap()
    }

    #[test]
    fn parse_numbered() {
        let release = release("4.8.0");
        assert_eq!(4, release.major);
        assert_eq!(8, release.minor);
        assert_eq!(Patch::Number(0), release.patch);
    }

    #[test]
    fn parse_stream() {
        let release = release("3.11.z");
        assert_eq!(3, release.major);
        assert_eq!(11, release.minor);
        assert_eq!(Patch::Stream, release.patch);
    }

    #[test]
    fn reject_malformed() {
        for s in ["", "4", "4.8", "4.8.", "4.8.0.1", "a.b.c", "4.z.8", "4.8.zz"] {
            assert!(s.parse::<Release>().is_err(), "accepted `{s}`");
        }
    }

    #[test]
    fn ordering() {
        assert!(release("4.7.z") < release("4.8.0"));
        assert!(release("4.8.0") < release("4.8.1"));
        // the maintenance stream trails every numbered patch of its minor
        assert!(release("4.8.1") < release("4.8.z"));
        assert!(release("3.11.z") < release("4.0.0"));
    }

    #[test]
    fn same_major() {
        assert!(release("4.7.z").same_major(&release("4.8.0")));
        assert!(!release("3.11.z").same_major(&release("4.8.0")));
    }

    #[test]
    fn display_round_trip() {
        for s in ["4.8.0", "4.8.z", "3.11.4"] {
            assert_eq!(s, release(s).to_string());
        }
    }

    #[test]
    fn release_serde() {
        let release: Release = serde_json::from_str(r#""4.8.z""#).unwrap();
        assert_eq!(4, release.major);
        assert_eq!(Patch::Stream, release.patch);

        let json = serde_json::to_string(&release).unwrap();
        assert_eq!(r#""4.8.z""#, json);

        assert!(serde_json::from_str::<Release>(r#""4.8""#).is_err());
    }
}
