//! Static skill catalog.
//!
//! Maps skill ids (the values stored in `skills` and sent as topic
//! categories) to display labels. Lookups never fail: an id missing from the
//! catalog is its own label.

/// One selectable skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Skill {
    /// Stable id stored on records.
    pub value: &'static str,
    /// Human-readable label.
    pub label: &'static str,
}

const fn skill(value: &'static str, label: &'static str) -> Skill {
    Skill { value, label }
}

static CATALOG: &[Skill] = &[
    // Languages
    skill("javascript", "JavaScript"),
    skill("typescript", "TypeScript"),
    skill("python", "Python"),
    skill("java", "Java"),
    skill("kotlin", "Kotlin"),
    skill("swift", "Swift"),
    skill("c", "C"),
    skill("cpp", "C++"),
    skill("csharp", "C#"),
    skill("go", "Go"),
    skill("rust", "Rust"),
    skill("ruby", "Ruby"),
    skill("php", "PHP"),
    skill("scala", "Scala"),
    skill("elixir", "Elixir"),
    skill("dart", "Dart"),
    skill("sql", "SQL"),
    // Frontend
    skill("html", "HTML"),
    skill("css", "CSS"),
    skill("react", "React"),
    skill("nextjs", "Next.js"),
    skill("vue", "Vue.js"),
    skill("angular", "Angular"),
    skill("svelte", "Svelte"),
    skill("tailwindcss", "Tailwind CSS"),
    skill("redux", "Redux"),
    // Backend
    skill("nodejs", "Node.js"),
    skill("express", "Express"),
    skill("nestjs", "NestJS"),
    skill("django", "Django"),
    skill("flask", "Flask"),
    skill("fastapi", "FastAPI"),
    skill("spring", "Spring"),
    skill("rails", "Ruby on Rails"),
    skill("laravel", "Laravel"),
    skill("dotnet", ".NET"),
    skill("graphql", "GraphQL"),
    // Data
    skill("postgresql", "PostgreSQL"),
    skill("mysql", "MySQL"),
    skill("sqlite", "SQLite"),
    skill("mongodb", "MongoDB"),
    skill("redis", "Redis"),
    skill("elasticsearch", "Elasticsearch"),
    skill("kafka", "Apache Kafka"),
    skill("pandas", "pandas"),
    skill("pytorch", "PyTorch"),
    skill("tensorflow", "TensorFlow"),
    // Infrastructure
    skill("docker", "Docker"),
    skill("kubernetes", "Kubernetes"),
    skill("terraform", "Terraform"),
    skill("aws", "Amazon Web Services"),
    skill("gcp", "Google Cloud Platform"),
    skill("azure", "Microsoft Azure"),
    skill("linux", "Linux"),
    skill("git", "Git"),
    skill("github-actions", "GitHub Actions"),
    // Mobile
    skill("react-native", "React Native"),
    skill("flutter", "Flutter"),
    skill("android", "Android"),
    skill("ios", "iOS"),
];

/// Returns every catalog entry, in display order.
///
/// This is the option list for the skills multi-select.
pub fn all() -> &'static [Skill] {
    CATALOG
}

/// Looks up a skill by id.
pub fn find(id: &str) -> Option<&'static Skill> {
    CATALOG.iter().find(|s| s.value == id)
}

/// Returns true if `id` is in the catalog.
pub fn is_known(id: &str) -> bool {
    find(id).is_some()
}

/// Returns the display label for `id`, or `id` itself when unknown.
///
/// # Example
/// ```
/// use expforms::skills::skill_label;
///
/// assert_eq!(skill_label("nextjs"), "Next.js");
/// assert_eq!(skill_label("cobol-on-cogs"), "cobol-on-cogs");
/// ```
pub fn skill_label(id: &str) -> &str {
    match find(id) {
        Some(skill) => skill.label,
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_skill_label() {
        assert_eq!(skill_label("react"), "React");
        assert_eq!(skill_label("cpp"), "C++");
        assert!(is_known("rust"));
    }

    #[test]
    fn test_unknown_skill_falls_back_to_id() {
        assert_eq!(skill_label("my-internal-dsl"), "my-internal-dsl");
        assert!(!is_known("my-internal-dsl"));
        assert!(find("my-internal-dsl").is_none());
    }

    #[test]
    fn test_catalog_values_unique() {
        let catalog = all();
        for (i, s) in catalog.iter().enumerate() {
            assert!(
                !catalog[..i].iter().any(|other| other.value == s.value),
                "duplicate catalog id {}",
                s.value
            );
        }
    }
}
