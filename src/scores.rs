use std::fs;
use std::path::PathBuf;

const MAGIC: &[u8; 4] = b"INV1";
// File layout: 4 magic + 4 score (LE) = 8 bytes
const FILE_SIZE: usize = 8;

/// The single persistent high score. Loads once at startup; rewrites the
/// file whenever a run beats the stored value. Read and write failures are
/// swallowed: a missing or corrupt file just means a high score of zero.
pub struct HighScore {
    value: u32,
    path: PathBuf,
}

impl HighScore {
    pub fn load() -> Self {
        Self::load_from(Self::default_path())
    }

    pub(crate) fn load_from(path: PathBuf) -> Self {
        let mut hs = HighScore { value: 0, path };
        hs.read_file();
        hs
    }

    fn default_path() -> PathBuf {
        // Store next to the executable
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join("invaders.scores");
            }
        }
        PathBuf::from("invaders.scores")
    }

    fn read_file(&mut self) {
        let Ok(data) = fs::read(&self.path) else { return };
        if data.len() < FILE_SIZE {
            return;
        }
        if &data[0..4] != MAGIC {
            return;
        }
        let bytes: [u8; 4] = [data[4], data[5], data[6], data[7]];
        self.value = u32::from_le_bytes(bytes);
    }

    fn write_file(&self) {
        let mut buf = Vec::with_capacity(FILE_SIZE);
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&self.value.to_le_bytes());
        let _ = fs::write(&self.path, &buf);
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Raises the stored high score if `score` beats it. Returns true when a
    /// new record was set.
    pub fn commit(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            self.write_file();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("invaders-se-{}-{}", std::process::id(), name))
    }

    #[test]
    fn missing_file_loads_zero() {
        let hs = HighScore::load_from(temp_path("missing"));
        assert_eq!(hs.value(), 0);
    }

    #[test]
    fn corrupt_file_loads_zero() {
        let path = temp_path("corrupt");
        fs::write(&path, b"garbage!").unwrap();
        let hs = HighScore::load_from(path.clone());
        assert_eq!(hs.value(), 0);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn commit_round_trip() {
        let path = temp_path("roundtrip");
        let _ = fs::remove_file(&path);
        let mut hs = HighScore::load_from(path.clone());
        assert!(hs.commit(150));
        let reloaded = HighScore::load_from(path.clone());
        assert_eq!(reloaded.value(), 150);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn commit_never_lowers() {
        let path = temp_path("monotonic");
        let _ = fs::remove_file(&path);
        let mut hs = HighScore::load_from(path.clone());
        assert!(hs.commit(200));
        assert!(!hs.commit(120));
        assert_eq!(hs.value(), 200);
        // Replaying the same final score is a no-op too.
        assert!(!hs.commit(200));
        assert_eq!(hs.value(), 200);
        let _ = fs::remove_file(path);
    }
}
