//! Built-in page text. Markup in these strings is trusted and author-controlled.

use super::{Contact, Subdomain, SubdomainStatus};

pub const SITE_TITLE: &str = "Dovuchcha Support";

pub const GENERAL: &str = "Welcome to the support documentation. Here you’ll find everything you need to get started quickly.";

pub const DOMAIN_SERVICES: &str = r#"You can check existing domains at <a href="https://domain.dovuchcha.uz">domain.dovuchcha.uz</a>.
If you wish to build your project under the name of Dovuchcha, you can order a new domain by contacting our support team."#;

pub const REGISTRATION: &str = r#"
    Registering for a Dovuchcha account provides you with a unified login to access an array of Dovuchcha services and resources. While direct self-registration through
    <a href="https://accounts.dovuchcha.uz">accounts.dovuchcha.uz</a> is currently unavailable, our support team is here to assist you in setting up an account tailored to your needs.

    You can still log in with existing credentials at
    <a href="https://accounts.dovuchcha.uz/login">accounts.dovuchcha.uz/login</a>, ensuring continuous access for current users.

    Once your account is created, you will be able to:
    <ul>
      <li><strong>Dovuchcha Account Center (<a href="https://accounts.dovuchcha.uz">accounts.dovuchcha.uz</a>):</strong> Manage your profile details, update billing information, review security settings, and track your activity across Dovuchcha’s services.</li>
      <li><strong>Dovuchcha ArtLab (<a href="https://artlab.dovuchcha.uz">artlab.dovuchcha.uz</a>):</strong> Explore our curated collection of digital artworks, participate in community-driven art projects, and personalize your art collection experience.</li>
      <li><strong>Dovuchcha Domain Services (<a href="https://domain.dovuchcha.uz">domain.dovuchcha.uz</a>):</strong> Register and manage free subdomains for personal or professional projects, making it easier to establish an online presence under the Dovuchcha brand.</li>
    </ul>

    If you need an account, please contact our support team. They will guide you through the verification process, address any special requirements, and ensure a smooth onboarding experience. We appreciate your patience and cooperation as we work to enhance our self-service registration options in the future.
  "#;

pub const GUIDES: &str = "Step-by-step instructions on how to use our platform and integrate it into your workflow.
Integration Guide: Learn how to integrate our product.
Customization Guide: Tailor the settings to your needs.";

pub const API_DESCRIPTION: &str = "We provide an API designed for both personal and professional projects, enabling developers to interact with Dovuchcha accounts and the ArtLab platform programmatically. Below is an example of a request and response for the ArtLab API.";

pub const API_INSTRUCTIONS: &str = "To gain access to our API, please contact our support team. They will assist you in obtaining the necessary credentials and guide you through the integration process, ensuring you can leverage our API for your specific needs.";

pub const FAQS: [(&str, &str); 4] = [
    (
        "How do I reset my password?",
        "
        Currently, the 'Forgot Password' feature on accounts.dovuchcha.uz is not available.
        We are actively working on enabling this feature in the near future.

        In the meantime, if you've forgotten your password, please contact our support team at
        dovuchcha@dovuchcha.uz or via Telegram at Support Admin.
        Our team will assist you with resetting your password.
      ",
    ),
    (
        "Where can I find billing information?",
        "Billing information can be found in your account settings under the 'Billing' section. Here you can view invoices, update payment methods, and manage subscriptions.",
    ),
    (
        "How do I contact support?",
        "You can contact our support team via email at dovuchcha@dovuchcha.uz or through our Telegram channel at Support Admin.",
    ),
    (
        "Can I integrate the API with my existing systems?",
        "Absolutely! Our API is designed to be flexible and can be integrated with a wide range of systems. For detailed instructions, refer to our API Reference section.",
    ),
];

pub fn contacts() -> Vec<Contact> {
    vec![
        Contact {
            label: "Email".to_string(),
            display: "dovuchcha@dovuchcha.uz".to_string(),
            href: "mailto:dovuchcha@dovuchcha.uz".to_string(),
        },
        Contact {
            label: "Telegram".to_string(),
            display: "Support Admin".to_string(),
            href: "https://t.me/behzodmusurmonqulov".to_string(),
        },
    ]
}

pub fn subdomains() -> Vec<Subdomain> {
    use SubdomainStatus::{Active, Inactive, Maintenance};

    [
        ("www.dovuchcha.uz", "Main website, root", Active),
        (
            "waiting.dovuchcha.uz",
            "Interface for experimental subdomains and those currently pending approval.",
            Active,
        ),
        ("support.dovuchcha.uz", "Customer support portal", Active),
        ("dev.dovuchcha.uz", "Development and staging environment", Maintenance),
        ("api.dovuchcha.uz", "RESTful API endpoints", Active),
        ("mail.dovuchcha.uz", "Email server", Active),
        ("legacy.dovuchcha.uz", "Old version of the website", Inactive),
        ("docs.dovuchcha.uz", "Documentation and user guides", Active),
    ]
    .into_iter()
    .map(|(name, purpose, status)| Subdomain {
        name: name.to_string(),
        purpose: purpose.to_string(),
        status,
    })
    .collect()
}
