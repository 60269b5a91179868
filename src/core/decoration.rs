//! Ref-name decorations attached to commits.

/// Ref names pointing at a commit, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoration {
    /// Local branches (`refs/heads/*`).
    pub branches: Vec<String>,
    /// Tags (`refs/tags/*`).
    pub tags: Vec<String>,
    /// Everything else: remote branches, `HEAD`, stash.
    pub refs: Vec<String>,
}

impl Decoration {
    /// Parse git's `%D` output produced with `--decorate=full`.
    ///
    /// Accepts entries like `HEAD -> refs/heads/main`, `tag: refs/tags/v1.0`
    /// and `refs/remotes/origin/main`, separated by `, `. Surrounding
    /// parentheses (`%d` style) are tolerated.
    pub fn parse(raw: &str) -> Self {
        let mut deco = Self::default();
        let mut text = raw.trim();
        if let Some(inner) = text.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
            text = inner;
        }

        for token in text.split(", ").map(str::trim).filter(|t| !t.is_empty()) {
            if let Some(target) = token.strip_prefix("HEAD -> ") {
                deco.push_ref(target.trim());
                continue;
            }
            if let Some(tag) = token.strip_prefix("tag: ") {
                let tag = tag.trim();
                deco.tags
                    .push(tag.strip_prefix("refs/tags/").unwrap_or(tag).to_string());
                continue;
            }
            deco.push_ref(token);
        }

        deco
    }

    fn push_ref(&mut self, name: &str) {
        if let Some(branch) = name.strip_prefix("refs/heads/") {
            self.branches.push(branch.to_string());
        } else if let Some(tag) = name.strip_prefix("refs/tags/") {
            self.tags.push(tag.to_string());
        } else if let Some(remote) = name.strip_prefix("refs/remotes/") {
            self.refs.push(remote.to_string());
        } else if let Some(other) = name.strip_prefix("refs/") {
            self.refs.push(other.to_string());
        } else {
            self.refs.push(name.to_string());
        }
    }

    /// Whether no ref points at the commit.
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty() && self.tags.is_empty() && self.refs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_decoration() {
        let deco = Decoration::parse(
            "HEAD -> refs/heads/main, tag: refs/tags/v1.2, refs/remotes/origin/main, refs/heads/dev",
        );
        assert_eq!(deco.branches, vec!["main", "dev"]);
        assert_eq!(deco.tags, vec!["v1.2"]);
        assert_eq!(deco.refs, vec!["origin/main"]);
    }

    #[test]
    fn detached_head_is_a_ref() {
        let deco = Decoration::parse("HEAD, refs/stash");
        assert!(deco.branches.is_empty());
        assert_eq!(deco.refs, vec!["HEAD", "stash"]);
    }

    #[test]
    fn tolerates_parentheses_and_short_names() {
        let deco = Decoration::parse(" (HEAD -> main, tag: v2) ");
        assert_eq!(deco.refs, vec!["main"]);
        assert_eq!(deco.tags, vec!["v2"]);
    }

    #[test]
    fn empty_input() {
        assert!(Decoration::parse("").is_empty());
        assert!(Decoration::parse("  ").is_empty());
    }
}
