//! Fixed service and doctor listings.

use once_cell::sync::Lazy;

use super::types::{Doctor, Service};

static SERVICES: Lazy<Vec<Service>> = Lazy::new(|| {
    [
        (
            1,
            "Cardiology",
            "Comprehensive heart care with state-of-the-art diagnostic technology",
            "❤️",
        ),
        (
            2,
            "Neurology",
            "Expert care for brain and nervous system disorders",
            "🧠",
        ),
        (
            3,
            "Orthopedics",
            "Advanced treatments for bone and joint conditions",
            "🦴",
        ),
        (
            4,
            "Ophthalmology",
            "Complete eye care and vision correction services",
            "👁️",
        ),
    ]
    .into_iter()
    .map(|(id, name, description, icon)| Service {
        id,
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    })
    .collect()
});

static DOCTORS: Lazy<Vec<Doctor>> = Lazy::new(|| {
    [
        (
            1,
            "Dr. Sarah Chen",
            "Cardiologist",
            "15+ years",
            "15+ years of experience in cardiovascular medicine",
        ),
        (
            2,
            "Dr. Michael Rodriguez",
            "Neurologist",
            "12+ years",
            "Expert in neurological disorders and treatments",
        ),
        (
            3,
            "Dr. Emily Watson",
            "Orthopedic Surgeon",
            "10+ years",
            "Specialized in joint replacement and sports medicine",
        ),
    ]
    .into_iter()
    .map(|(id, name, specialty, experience, description)| Doctor {
        id,
        name: name.to_string(),
        specialty: specialty.to_string(),
        experience: experience.to_string(),
        description: description.to_string(),
    })
    .collect()
});

/// Services in display order.
pub fn services() -> &'static [Service] {
    &SERVICES
}

/// Doctors in display order.
pub fn doctors() -> &'static [Doctor] {
    &DOCTORS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn services_are_fixed_and_ordered() {
        let names: Vec<&str> = services().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            ["Cardiology", "Neurology", "Orthopedics", "Ophthalmology"]
        );
        assert!(services()
            .iter()
            .all(|s| !s.name.is_empty() && !s.description.is_empty()));
    }

    #[test]
    fn ids_are_sequential() {
        assert!(services().iter().zip(1..).all(|(s, id)| s.id == id));
        assert!(doctors().iter().zip(1..).all(|(d, id)| d.id == id));
    }

    #[test]
    fn three_doctors() {
        assert_eq!(doctors().len(), 3);
        assert_eq!(doctors()[0].name, "Dr. Sarah Chen");
        assert_eq!(doctors()[2].specialty, "Orthopedic Surgeon");
    }
}
