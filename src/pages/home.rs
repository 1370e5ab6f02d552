use leptos::prelude::*;

use crate::components::anchor::AnchorLink;
use crate::components::bubbles::FloatingBubbles;
use crate::components::countdown::Countdown;
use crate::components::faq::{Faq, FaqItem};
use crate::components::header::{NavLink, SiteHeader};
use crate::components::hero_slider::HeroSlider;
use crate::components::neural_field::NeuralFieldCanvas;
use crate::components::pricing::{Plan, PricingCards};
use crate::components::visibility::use_page_visible;

const NAV: &[NavLink] = &[
	NavLink {
		href: "#home",
		label: "Home",
	},
	NavLink {
		href: "#features",
		label: "Features",
	},
	NavLink {
		href: "#pricing",
		label: "Pricing",
	},
	NavLink {
		href: "#faq",
		label: "FAQ",
	},
];

const HERO_IMAGES: &[&str] = &[
	"/assets/hero-1.webp",
	"/assets/hero-2.webp",
	"/assets/hero-3.webp",
];

fn plans() -> Vec<Plan> {
	vec![
		Plan {
			name: "Starter",
			price: "$19",
			features: vec!["1 site", "Email support", "Monthly reports"],
			featured: false,
		},
		Plan {
			name: "Growth",
			price: "$49",
			features: vec!["5 sites", "Priority support", "Weekly reports", "A/B testing"],
			featured: true,
		},
		Plan {
			name: "Scale",
			price: "$99",
			features: vec!["Unlimited sites", "Dedicated manager", "Daily reports"],
			featured: false,
		},
	]
}

fn faq() -> Vec<FaqItem> {
	vec![
		FaqItem {
			question: "Can I change plans later?",
			answer: "Yes. Upgrades apply immediately and downgrades at the next billing cycle.",
		},
		FaqItem {
			question: "Is there a free trial?",
			answer: "Every plan starts with a 14-day trial, no card required.",
		},
		FaqItem {
			question: "How do I cancel?",
			answer: "From your dashboard, at any time. No questions asked.",
		},
	]
}

/// Landing page. Owns page visibility and hands it to everything that animates.
#[component]
pub fn Home() -> impl IntoView {
	let visible = use_page_visible();
	let paused = Signal::derive(move || !visible.get());
	let year = js_sys::Date::new_0().get_full_year();

	view! {
		<NeuralFieldCanvas paused=paused />
		<SiteHeader brand="NeuroLaunch" links=NAV.to_vec() />

		<main>
			<section id="home" class="hero-section">
				<div class="hero-copy">
					<h1>"Launch faster with a site that thinks ahead"</h1>
					<p class="subtitle">"Conversion-focused pages, built and tuned for you."</p>
					<AnchorLink href="#pricing" id="ctaButton" class="cta-button">
						"See plans"
					</AnchorLink>
				</div>
				<HeroSlider images=HERO_IMAGES.to_vec() page_visible=visible />
			</section>

			<section id="features" class="features-section">
				<h2>"Why choose us"</h2>
				<ul class="feature-list">
					<li>"Hand-tuned performance on every device"</li>
					<li>"Analytics wired in from day one"</li>
					<li>"Copy and design iterated with your data"</li>
				</ul>
				<FloatingBubbles />
			</section>

			<section id="pricing" class="pricing-section">
				<h2>"Pricing"</h2>
				<PricingCards plans=plans() />
				<div class="cta-timer">
					<p>"Launch discount ends in"</p>
					<Countdown />
				</div>
				<FloatingBubbles />
			</section>

			<section id="faq" class="faq-section">
				<h2>"Frequently asked questions"</h2>
				<Faq items=faq() />
			</section>
		</main>

		<footer id="contact" class="site-footer">
			<p>"Ready to start? " <a href="mailto:hello@neurolaunch.dev">"hello@neurolaunch.dev"</a></p>
			<p>"© " <span id="current-year">{year}</span> " NeuroLaunch"</p>
		</footer>
	}
}
