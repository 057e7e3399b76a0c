//! Taxonomy and lexical matcher tables.
//!
//! An ordered set of named pattern rules, each mapping matched text to a
//! component type and a base description, plus the auxiliary version and
//! environment patterns used for description enrichment. The tables are
//! immutable, loaded once, and shared read-only between concurrent analyses.
//!
//! Matchers are applied independently and are not mutually exclusive: the
//! same span of text may be claimed by several matchers, each producing its
//! own component. This over-generation is deliberate (recall over precision).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::ComponentType;

/// How a matcher derives the component name from its captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherKind {
    /// Two-group rule: a keyword followed by an identifier. The name is
    /// `group1 + " " + group2` when group 2 is present and non-empty, else
    /// `group1` alone. Candidates pass the stop-word and length filters and
    /// the base description gains the "identifié dans le document" suffix.
    Family,
    /// Single-group keyword rule over a fixed vocabulary. The matched word is
    /// the name; no filtering, base description used as-is.
    Keyword,
}

/// A lexical pattern bound to a component type and base description.
#[derive(Debug)]
pub struct Matcher {
    /// Short rule name, used in logs
    pub label: &'static str,
    /// Name-derivation and filtering behavior
    pub kind: MatcherKind,
    /// Taxonomy type assigned to every match
    pub component_type: ComponentType,
    /// Human-readable base description for matched components
    pub base_description: &'static str,
    /// Whether the keyword group names an underlying technology
    pub captures_technology: bool,
    regex: Regex,
}

impl Matcher {
    fn family(
        label: &'static str,
        pattern: &str,
        component_type: ComponentType,
        base_description: &'static str,
        captures_technology: bool,
    ) -> Self {
        Self {
            label,
            kind: MatcherKind::Family,
            component_type,
            base_description,
            captures_technology,
            regex: compile(pattern),
        }
    }

    fn keyword(
        label: &'static str,
        pattern: &str,
        component_type: ComponentType,
        base_description: &'static str,
    ) -> Self {
        Self {
            label,
            kind: MatcherKind::Keyword,
            component_type,
            base_description,
            captures_technology: false,
            regex: compile(pattern),
        }
    }

    /// The compiled pattern
    pub fn regex(&self) -> &Regex {
        &self.regex
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("static matcher pattern must compile")
}

/// The ordered matcher table. Application order matters only for description
/// precedence under deduplication (first occurrence wins).
pub static MATCHERS: Lazy<Vec<Matcher>> = Lazy::new(|| {
    vec![
        // Infrastructure
        Matcher::family(
            "server",
            r"(?i)\b(serveur|server|machine|host|nœud|node)\s+([A-Za-z0-9_.-]{2,})\b",
            ComponentType::Server,
            "Serveur physique ou virtuel",
            false,
        ),
        Matcher::family(
            "network_device",
            r"(?i)\b(routeur|router|switch|firewall|pare-feu|load balancer|répartiteur de charge|proxy|passerelle|gateway)\s+([A-Za-z0-9_.-]{2,})\b",
            ComponentType::NetworkDevice,
            "Équipement réseau",
            false,
        ),
        Matcher::family(
            "cloud",
            r"(?i)\b(cloud|AWS|Azure|GCP|Google Cloud|S3|EC2|Lambda|Azure Functions)\s+([A-Za-z0-9_.-]{2,})?\b",
            ComponentType::CloudService,
            "Service cloud",
            true,
        ),
        Matcher::family(
            "virtualization",
            r"(?i)\b(VM|machine virtuelle|virtual machine|conteneur|container|docker|kubernetes|k8s|pod|cluster)\s+([A-Za-z0-9_.-]{2,})?\b",
            ComponentType::Virtualization,
            "Environnement virtualisé",
            true,
        ),
        // Data and storage
        Matcher::family(
            "database",
            r"(?i)\b(base de données|database|bdd|db|sql|oracle|mysql|postgresql|mongodb|nosql|sqlite|mariadb|cassandra|redis|elasticsearch)\s+([A-Za-z0-9_.-]{2,})?\b",
            ComponentType::Database,
            "Base de données ou système de gestion de données",
            true,
        ),
        Matcher::family(
            "data_warehouse",
            r"(?i)\b(entrepôt de données|data warehouse|data lake|lac de données|big data|hadoop|spark|dataproc|snowflake)\s+([A-Za-z0-9_.-]{2,})?\b",
            ComponentType::DataWarehouse,
            "Entrepôt ou lac de données",
            true,
        ),
        Matcher::family(
            "file_storage",
            r"(?i)\b(stockage fichier|file storage|NAS|SAN|partage réseau|network share|GFS|HDFS|EFS)\s+([A-Za-z0-9_.-]{2,})?\b",
            ComponentType::FileStorage,
            "Stockage de fichiers",
            false,
        ),
        // Software and applications
        Matcher::family(
            "application",
            r"(?i)\b(application|app|logiciel|software|système|system|plateforme|platform|portail|portal)\s+([A-Za-z0-9_.-]{2,})\b",
            ComponentType::Application,
            "Application métier",
            false,
        ),
        Matcher::family(
            "enterprise_system",
            r"(?i)\b(ERP|SAP|Oracle EBS|PeopleSoft|Microsoft Dynamics|Sage|CRM|Salesforce|Microsoft Dynamics CRM|SugarCRM)\s+([A-Za-z0-9_.-]{2,})?\b",
            ComponentType::EnterpriseSystem,
            "Système d'entreprise (ERP, CRM, etc.)",
            true,
        ),
        Matcher::family(
            "web_system",
            r"(?i)\b(site web|website|application web|web app|intranet|extranet|webapp|serveur web|web server|apache|nginx|IIS)\s+([A-Za-z0-9_.-]{2,})?\b",
            ComponentType::WebSystem,
            "Système ou application web",
            true,
        ),
        Matcher::family(
            "middleware",
            r"(?i)\b(middleware|API Gateway|ESB|bus de service|ETL|Talend|Informatica|MuleSoft|RabbitMQ|Kafka|ActiveMQ|JMS|message broker)\s+([A-Za-z0-9_.-]{2,})?\b",
            ComponentType::Middleware,
            "Middleware ou système d'intégration",
            true,
        ),
        // Security
        Matcher::family(
            "security",
            r"(?i)\b(pare-feu|firewall|WAF|IDS|IPS|VPN|DMZ|bastion|proxy|authentification|authentication|autorisation|authorization|IAM|Active Directory|LDAP|SSO)\s+([A-Za-z0-9_.-]{2,})?\b",
            ComponentType::Security,
            "Système ou dispositif de sécurité",
            false,
        ),
        // Business elements
        Matcher::family(
            "business_process",
            r"(?i)\b(processus|process|workflow|flux de travail|business process|BPMN)\s+([A-Za-z0-9_.-]{2,})\b",
            ComponentType::BusinessProcess,
            "Processus métier",
            false,
        ),
        Matcher::family(
            "department",
            r"(?i)\b(département|department|service|direction|division)\s+([A-Za-z0-9_.-]{2,})\b",
            ComponentType::Department,
            "Département ou unité organisationnelle",
            false,
        ),
        // Product-specific vocabulary
        Matcher::keyword(
            "platform",
            r"(?i)\b(SImap|SaaS|agent local|scanner réseau|composante SaaS|interface utilisateur|agent|scanner)\b",
            ComponentType::Saas,
            "Composante de la plateforme SImap pour la cartographie des SI",
        ),
        Matcher::keyword(
            "nlp",
            r"(?i)\b(NLP|Natural Language Processing|IA|intelligence artificielle|AI|machine learning|apprentissage automatique|deep learning|GPT)\b",
            ComponentType::Technology,
            "Technologie d'intelligence artificielle/NLP",
        ),
        Matcher::keyword(
            "architecture",
            r"(?i)\b(TOGAF|architecture|cartographie|mapping|urbanisation|SOA|microservices)\b",
            ComponentType::Architecture,
            "Concept d'architecture d'entreprise",
        ),
    ]
});

/// Version needle appended to a component-name pattern during enrichment.
/// The dotted numeric string is captured as `ver`.
pub const VERSION_NEEDLE: &str = r"\b(?:version|v)\s*(?P<ver>\d+(?:\.\d+){0,2})\b";

/// Environment needle appended to a component-name pattern during enrichment.
/// The environment name is captured as `env`.
pub const ENVIRONMENT_NEEDLE: &str = r"\b(?:environnement|environment|env)\s*(?:de|:|-)?\s*(?P<env>production|prod|développement|dev|test|staging|qualification|recette|pré-production|preprod)\b";

/// Common short French function words rejected as component names. Suppresses
/// false positives from grammatical particles adjacent to a keyword.
pub static STOP_WORDS: &[&str] = &[
    "de", "des", "et", "le", "la", "les", "un", "une", "du", "au", "aux", "ce", "ces", "cette",
    "mon", "ton", "son", "nos", "vos", "leurs", "si", "pour", "par", "avec", "sans", "dans", "sur",
    "sous", "vers", "comme", "mais", "ou", "où", "qui", "que", "quoi", "dont", "comment",
    "exemple",
];

/// Keywords marking a component as critical when they co-occur with its name
/// anywhere in the document (substring containment, not proximity-bound).
pub static CRITICALITY_KEYWORDS: &[&str] = &["critique", "critical", "important", "prioritaire"];

/// Whether a candidate name is a stop word.
pub fn is_stop_word(name: &str) -> bool {
    let lowered = name.to_lowercase();
    STOP_WORDS.iter().any(|w| *w == lowered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matcher_table_is_well_formed() {
        assert!(MATCHERS.len() >= 16);
        for matcher in MATCHERS.iter() {
            assert!(!matcher.label.is_empty());
            assert!(!matcher.base_description.is_empty());
        }
    }

    #[test]
    fn server_matcher_captures_keyword_and_name() {
        let matcher = MATCHERS.iter().find(|m| m.label == "server").unwrap();
        let caps = matcher.regex().captures("Le serveur WEB01 héberge le portail").unwrap();
        assert_eq!(&caps[1], "serveur");
        assert_eq!(&caps[2], "WEB01");
    }

    #[test]
    fn keyword_matchers_use_single_group() {
        let matcher = MATCHERS.iter().find(|m| m.label == "nlp").unwrap();
        assert_eq!(matcher.kind, MatcherKind::Keyword);
        let caps = matcher.regex().captures("analyse par NLP avancée").unwrap();
        assert_eq!(&caps[1], "NLP");
    }

    #[test]
    fn version_needle_captures_dotted_numbers() {
        let re = Regex::new(&format!("(?i){VERSION_NEEDLE}")).unwrap();
        let caps = re.captures("déployé en version 2.3.1 depuis mars").unwrap();
        assert_eq!(&caps["ver"], "2.3.1");

        let caps = re.captures("passage à v12").unwrap();
        assert_eq!(&caps["ver"], "12");
    }

    #[test]
    fn environment_needle_accepts_connectives() {
        let re = Regex::new(&format!("(?i){ENVIRONMENT_NEEDLE}")).unwrap();
        for text in [
            "environnement de production",
            "environment: staging",
            "env - test",
        ] {
            assert!(re.is_match(text), "should match {text:?}");
        }
    }

    #[test]
    fn stop_words_reject_particles() {
        assert!(is_stop_word("des"));
        assert!(is_stop_word("Avec"));
        assert!(!is_stop_word("WEB01"));
    }
}
