//! The animal taxonomy shown in the graph panel.

/// Strength of links inside a group (species to its class).
pub const GROUP_STRENGTH: f32 = 0.5;

/// Strength of the loose links across groups.
pub const CROSS_STRENGTH: f32 = 0.1;

pub const NODE_IDS: &[&str] = &[
    "mammal", "dog", "cat", "fox", "elk", "insect", "ant", "bee", "fish", "carp", "pike",
];

/// `(source, target, strength)`
pub const LINKS: &[(&str, &str, f32)] = &[
    ("dog", "mammal", GROUP_STRENGTH),
    ("cat", "mammal", GROUP_STRENGTH),
    ("fox", "mammal", GROUP_STRENGTH),
    ("elk", "mammal", GROUP_STRENGTH),
    ("ant", "insect", GROUP_STRENGTH),
    ("bee", "insect", GROUP_STRENGTH),
    ("carp", "fish", GROUP_STRENGTH),
    ("pike", "fish", GROUP_STRENGTH),
    ("elk", "cat", CROSS_STRENGTH),
    ("ant", "carp", CROSS_STRENGTH),
    ("bee", "elk", CROSS_STRENGTH),
    ("cat", "dog", CROSS_STRENGTH),
    ("ant", "fox", CROSS_STRENGTH),
    ("cat", "pike", CROSS_STRENGTH),
];

/// A link between two node indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    pub strength: f32,
}

/// Node labels and links resolved to indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    pub labels: Vec<&'static str>,
    pub links: Vec<Link>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        let labels = NODE_IDS.to_vec();
        let index = |id: &str| labels.iter().position(|&label| label == id);

        let links = LINKS
            .iter()
            .filter_map(|&(source, target, strength)| {
                Some(Link {
                    source: index(source)?,
                    target: index(target)?,
                    strength,
                })
            })
            .collect();

        Self { labels, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_link_resolves() {
        let taxonomy = Taxonomy::default();
        assert_eq!(taxonomy.labels.len(), 11);
        assert_eq!(taxonomy.links.len(), LINKS.len());
        assert_eq!(taxonomy.links.len(), 14);
    }

    #[test]
    fn test_group_and_cross_strengths() {
        let taxonomy = Taxonomy::default();
        let group = taxonomy
            .links
            .iter()
            .filter(|l| l.strength == GROUP_STRENGTH)
            .count();
        assert_eq!(group, 8);

        let dog = taxonomy.labels.iter().position(|&l| l == "dog").unwrap();
        let mammal = taxonomy.labels.iter().position(|&l| l == "mammal").unwrap();
        assert_eq!(
            taxonomy.links[0],
            Link {
                source: dog,
                target: mammal,
                strength: GROUP_STRENGTH
            }
        );
    }
}
